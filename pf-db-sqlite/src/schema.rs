table! {
    places (rowid) {
        rowid -> BigInt,
        address -> Text,
        lat -> Nullable<Double>,
        lon -> Nullable<Double>,
        updated_at -> BigInt,
    }
}
