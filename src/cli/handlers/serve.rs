//! Serve command handler

use crate::config::Settings;
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

    /// Validates the configuration, then either reports and exits
    /// (`dry_run`) or runs the server until shutdown.
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        self.validate_configuration()?;

        if dry_run {
            self.report();
            return Ok(());
        }

        Server::new(self.config).run().await.map_err(Into::into)
    }

    fn validate_configuration(&self) -> AppResult<()> {
        self.config.validate()?;
        self.config.auth.validate()?;
        Ok(())
    }

    fn report(&self) {
        println!("✓ Configuration is valid");
        println!("✓ Environment: {}", self.config.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Session secret is configured");
        println!("Dry run completed successfully - configuration is ready for deployment");
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
