//! Human-readable progress output.
//!
//! The procedure narrates each step to the operator. Output goes to any
//! [`Write`] (stdout in the binary, a buffer in tests); a failing writer never
//! interrupts the run.

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::Write;

use super::BootstrapOutcome;
use crate::service::SessionHandle;

/// Printed once the run finished successfully
pub const COMPLETION_MARKER: &str = "Secure initialization complete";

/// Sequential status reporter for one run
pub struct Progress<W: Write> {
    out: W,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter and hand back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: impl Display) {
        // Status lines are best effort
        let _ = writeln!(self.out, "{}", text);
    }

    pub fn started(&mut self) {
        self.line("🔒 Starting Milvus secure initialization...");
    }

    pub fn waiting(&mut self, attempt: u32, max_attempts: u32, error_snippet: &str) {
        self.line(format!(
            "⏳ Waiting for Milvus to start... ({}/{}) - {}",
            attempt, max_attempts, error_snippet
        ));
    }

    pub fn connected(&mut self, host: &str, port: u16) {
        self.line(format!("✅ Connected to Milvus ({}:{})", host, port));
    }

    pub fn rotating(&mut self, user: &str) {
        self.line(format!("🔐 Rotating password for '{}'...", user));
    }

    pub fn rotated(&mut self, user: &str) {
        self.line(format!("✅ Password for '{}' replaced with a generated password", user));
    }

    pub fn saved(&mut self, what: &str, location: &str) {
        self.line(format!("📝 {} saved to {}", what, location));
    }

    pub fn reconnected(&mut self, session: &SessionHandle) {
        self.line(format!("🔁 Reconnected as {}", session));
    }

    pub fn provisioning(&mut self, username: &str) {
        self.line(format!("👤 Creating application user '{}'...", username));
    }

    pub fn provisioned(&mut self, username: &str) {
        self.line(format!("✅ Application user '{}' created", username));
    }

    pub fn failed(&mut self, error: &dyn Display) {
        self.line(format!("❌ Secure initialization failed: {}", error).red());
    }

    /// Final summary and follow-up guidance for the operator.
    pub fn completed(&mut self, outcome: &BootstrapOutcome) {
        self.line(format!(
            "⚠️  Recommended: once another administrator exists, restrict use of the '{}' user",
            outcome.admin_user
        ));
        self.line("");
        self.line(format!("🎉 {}!", COMPLETION_MARKER).green());
        self.line("⚠️  Important:".yellow());
        self.line("   1. Keep the credential files somewhere safe");
        self.line(format!(
            "   2. Delete {} once the password has been stored elsewhere",
            outcome.admin_password_location
        ));
        self.line(format!(
            "   3. Connect as '{}' in production instead of '{}'",
            outcome.app_username, outcome.admin_user
        ));
        self.line("   4. Rotate passwords regularly");
    }
}
