/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

const CONFIG_PATH: &str = ".config/spendr/config.toml";

pub struct Filesystem {
	home: Option<PathBuf>,
}

impl Filesystem {
	pub fn new() -> Self {
		Self { home: home_dir() }
	}

	#[cfg(test)]
	fn with_home(home: &std::path::Path) -> Self {
		Self {
			home: Some(home.to_path_buf()),
		}
	}

	/// Fetches the config from the given path, or the default path if none.
	/// The default file is created empty the first time; a custom path has to
	/// exist already.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match custom_config_path {
			None => match &self.home {
				Some(home) => home.join(CONFIG_PATH),
				None => bail!("Unable to determine home directory"),
			},
			Some(p) => PathBuf::from(p),
		};

		if !config_path.exists() {
			if custom_config_path.is_some() {
				bail!("Config file not found: {}", config_path.display());
			}
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(&config_path)?;
		}

		debug!("reading config from {}", config_path.display());
		let content = fs::read_to_string(&config_path)?;
		let mut config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		if let Some(server) = &mut config.server {
			if server.api_token_cmd.is_some() && server.api_token.is_some() {
				bail!("Only one of server.api_token and server.api_token_cmd may be specified")
			}

			if let Some(api_token_cmd) = &server.api_token_cmd {
				server.api_token = Some(run_token_cmd(api_token_cmd)?);
			}
		}

		Ok(config)
	}
}

fn run_token_cmd(api_token_cmd: &str) -> Result<String, Error> {
	let output = Command::new("sh")
		.arg("-c")
		.arg(api_token_cmd)
		.output()
		.map_err(|e| anyhow!("failed to execute api_token_cmd: {}", e))?;

	if !output.status.success() {
		bail!(
			"api_token_cmd failed with status {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr)
		);
	}

	Ok(String::from_utf8(output.stdout)
		.map_err(|e| anyhow!("failed to parse command output: {}", e))?
		.trim()
		.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn write(dir: &TempDir, content: &str) -> String {
		let path = dir.path().join("config.toml");
		fs::write(&path, content).unwrap();
		path.to_string_lossy().to_string()
	}

	#[test]
	fn test_default_path_is_created() {
		let home = TempDir::new().unwrap();
		let config = Filesystem::with_home(home.path()).get_config(None).unwrap();
		assert!(home.path().join(CONFIG_PATH).exists());
		assert_eq!(config.url(), "http://localhost:3000");
	}

	#[test]
	fn test_custom_path_must_exist() {
		let home = TempDir::new().unwrap();
		let missing = home.path().join("nope.toml").to_string_lossy().to_string();
		let fs = Filesystem::with_home(home.path());
		assert!(fs.get_config(Some(&missing)).is_err());
		assert!(!home.path().join("nope.toml").exists());
	}

	#[test]
	fn test_token_cmd() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "[server]\napi_token_cmd = \"echo '  tok3n '\"\n");
		let config = Filesystem::with_home(dir.path())
			.get_config(Some(&path))
			.unwrap();
		assert_eq!(config.api_token().as_deref(), Some("tok3n"));
	}

	#[test]
	fn test_token_cmd_failure() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "[server]\napi_token_cmd = \"exit 3\"\n");
		let fs = Filesystem::with_home(dir.path());
		assert!(fs.get_config(Some(&path)).is_err());
	}

	#[test]
	fn test_token_and_cmd_conflict() {
		let dir = TempDir::new().unwrap();
		let path = write(
			&dir,
			"[server]\napi_token = \"a\"\napi_token_cmd = \"echo b\"\n",
		);
		let fs = Filesystem::with_home(dir.path());
		let err = fs.get_config(Some(&path)).unwrap_err();
		assert!(err.to_string().contains("Only one of"));
	}

	#[test]
	fn test_bad_toml() {
		let dir = TempDir::new().unwrap();
		let path = write(&dir, "[server\n");
		let fs = Filesystem::with_home(dir.path());
		let err = fs.get_config(Some(&path)).unwrap_err();
		assert!(err.to_string().starts_with("failed to parse config"));
	}
}
