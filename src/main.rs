#[macro_use]
extern crate log;

mod boundary;
mod cli;
mod config;
mod gateways;

fn main() {
    env_logger::init();
    if let Err(err) = cli::run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}
