pub mod chronometer;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod logger;
pub mod server;

use self::{chronometer::Chronometer, configuration::Configuration, create_server::create_server, error::Error, logger::Logger, server::Server};
use std::{net::SocketAddr, process, sync::Arc};
use tokio::runtime::Runtime;

fn main() {
    let logger = Logger::new();

    let configuration = match Configuration::new() {
        Ok(configuration) => configuration,
        Err(error) => {
            logger.log(format!("Invalid configuration: {}", error));
            process::exit(1);
        }
    };

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            logger.log(format!("Could not start runtime: {}", error));
            process::exit(1);
        }
    };

    let codec = configuration.codec();
    logger.log(format!("Using base {} alphabet {}", codec.base(), codec.alphabet()));

    let server = create_server(Arc::new(codec.clone()), logger);
    let address = SocketAddr::new(configuration.host(), configuration.port());
    logger.log(format!("Listening on {}", address));

    if let Err(error) = runtime.block_on(server.run(address)) {
        logger.log(format!("Server error: {}", error));
        process::exit(1);
    }
}
