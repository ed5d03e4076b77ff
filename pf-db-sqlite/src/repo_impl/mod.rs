use pf_core::repositories as repo;

mod place;

type Result<T> = std::result::Result<T, repo::Error>;

fn from_diesel_err(err: diesel::result::Error) -> repo::Error {
    match err {
        diesel::result::Error::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(anyhow::Error::from(err)),
    }
}
