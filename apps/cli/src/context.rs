use anyhow::{anyhow, Result};
use mp_core::MuseumsContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

pub struct Context {
	pub session: MuseumsContext,
	pub format: OutputFormat,
	user: Option<String>,
}

impl Context {
	pub fn new(session: MuseumsContext, format: OutputFormat, user: Option<String>) -> Self {
		Self {
			session,
			format,
			user: user.filter(|user| !user.trim().is_empty()),
		}
	}

	/// Signs in as the configured user, failing when there is none.
	pub async fn require_user(&mut self) -> Result<()> {
		if self.user.is_none() {
			return Err(anyhow!(
				"No user given, pass --user or set MUSEUM_PASSPORT_USER"
			));
		}

		self.sign_in_if_known().await
	}

	/// Signs in when a user was given; annotations are simply left out otherwise.
	pub async fn sign_in_if_known(&mut self) -> Result<()> {
		if let Some(user) = &self.user {
			if self.session.user_id() != Some(user.as_str()) {
				self.session.sign_in(user.clone()).await?;
			}
		}

		Ok(())
	}

	pub fn is_signed_in(&self) -> bool {
		self.session.user_id().is_some()
	}
}
