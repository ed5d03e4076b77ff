//! Gateway implementations for external services.

mod yandex;

pub use self::yandex::Yandex;
