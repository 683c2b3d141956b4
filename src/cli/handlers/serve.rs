//! Serve command handler
//!
//! Starts the HTTP server, or with `--dry-run` reports what it would serve.

use crate::config::{Settings, StoreBackend};
use crate::error::AppResult;
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the server until shutdown, or only validate when `dry_run` is set
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Server::new(self.config).run().await
        }
    }

    /// Validate configuration and print a summary without binding a socket
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Would serve: {}", self.config.service.name.service_name());
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            StoreBackend::Memory => println!("✓ Store backend: memory"),
            StoreBackend::Postgres => println!(
                "✓ Store backend: postgres (auto_migrate = {})",
                self.config.database.auto_migrate
            ),
        }
        let peers = &self.config.peers;
        for (name, peer) in [
            ("user-service", &peers.user_service),
            ("product-service", &peers.product_service),
            ("order-service", &peers.order_service),
        ] {
            println!(
                "✓ Peer {} at {} (timeout {}s)",
                name, peer.base_url, peer.timeout_secs
            );
        }

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
