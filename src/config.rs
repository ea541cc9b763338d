use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub profile: String,
    pub loan_period_days: u32,
}

impl Config {
    pub fn from_env() -> Self {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "default".to_string());

        Self {
            data_dir: env::var("LIBRARY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            profile,
            loan_period_days: env::var("LOAN_PERIOD_DAYS")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(DEFAULT_LOAN_PERIOD_DAYS),
        }
    }

    /// Path of the JSON store for the active profile
    pub fn store_path(&self) -> PathBuf {
        let filename = if self.profile == "default" {
            "library.json".to_string()
        } else {
            format!("library_{}.json", self.profile)
        };
        self.data_dir.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment run serially
        unsafe {
            env::remove_var("PROFILE");
            env::remove_var("LIBRARY_DATA_DIR");
            env::remove_var("LOAN_PERIOD_DAYS");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env();

        assert_eq!(config.profile, "default");
        assert_eq!(config.loan_period_days, 14);
        assert_eq!(config.store_path(), PathBuf::from("./library.json"));
    }

    #[test]
    #[serial]
    fn test_profile_and_overrides() {
        clear_env();
        unsafe {
            env::set_var("PROFILE", "branch2");
            env::set_var("LIBRARY_DATA_DIR", "/var/lib/library");
            env::set_var("LOAN_PERIOD_DAYS", "not-a-number");
        }

        let config = Config::from_env();
        assert_eq!(
            config.store_path(),
            PathBuf::from("/var/lib/library/library_branch2.json")
        );
        assert_eq!(config.loan_period_days, DEFAULT_LOAN_PERIOD_DAYS);
        clear_env();
    }
}
