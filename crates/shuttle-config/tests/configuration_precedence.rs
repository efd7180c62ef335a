//! Behavioural tests for layering of defaults, environment and flags.

use std::cell::RefCell;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use shuttle_config::{Config, ConfigError, LOG_FORMAT_ENV, MAX_REPLACEMENTS_ENV};

/// Serialises scenarios that mutate the process environment.
static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Result<Config, String>>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let harness = Self {
            cli_args: RefCell::new(vec![OsString::from("shuttle")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            _guard: guard,
        };
        for key in [LOG_FORMAT_ENV, MAX_REPLACEMENTS_ENV] {
            harness.remove_env(key);
        }
        harness
    }

    fn remember(&self, key: &str) {
        let previous = std::env::var_os(key);
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn set_env(&self, key: &str, value: &str) {
        self.remember(key);
        // Environment mutation is `unsafe` in edition 2024; the mutex keeps
        // scenarios from racing and `Drop` restores the previous values.
        unsafe { std::env::set_var(key, value) };
    }

    fn remove_env(&self, key: &str) {
        self.remember(key);
        unsafe { std::env::remove_var(key) };
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() {
            return;
        }
        let args = self.cli_args.borrow().clone();
        let result = Config::load_from_iter(args).map_err(|error| error.to_string());
        *self.loaded.borrow_mut() = Some(result);
    }

    fn config(&self) -> Config {
        self.load();
        match self.loaded.borrow().as_ref() {
            Some(Ok(config)) => config.clone(),
            Some(Err(error)) => panic!("configuration failed to load: {error}"),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

#[given("the environment sets {key} to {value}")]
fn given_environment(harness: &Harness, key: String, value: String) {
    harness.set_env(strip_quotes(&key), strip_quotes(&value));
}

#[when("the configuration loads without overrides")]
fn when_load(harness: &Harness) {
    harness.load();
}

#[when("the command line passes {flag} {value}")]
fn when_cli_flag(harness: &Harness, flag: String, value: String) {
    let mut args = harness.cli_args.borrow_mut();
    args.push(OsString::from(strip_quotes(&flag)));
    args.push(OsString::from(strip_quotes(&value)));
}

#[then("the replacement cap is {cap}")]
fn then_cap(harness: &Harness, cap: usize) {
    assert_eq!(harness.config().max_replacements(), cap);
}

#[then("the log format is {format}")]
fn then_format(harness: &Harness, format: String) {
    assert_eq!(
        harness.config().log_format().to_string(),
        strip_quotes(&format)
    );
}

#[then("loading fails mentioning {text}")]
fn then_failure(harness: &Harness, text: String) {
    harness.load();
    let loaded = harness.loaded.borrow();
    let Some(Err(message)) = loaded.as_ref() else {
        panic!("configuration should fail to load");
    };
    assert!(
        message.contains(strip_quotes(&text)),
        "unexpected message: {message}"
    );
}

#[scenario(path = "tests/features/configuration_precedence.feature")]
fn configuration_precedence(#[from(harness)] harness: Harness) {
    let _ = harness;
}

#[test]
fn zero_cap_is_reported_as_its_own_variant() {
    let harness = Harness::new();
    let args = [OsString::from("shuttle"), "--max-replacements".into(), "0".into()];

    let error = Config::load_from_iter(args).expect_err("zero cap is rejected");

    match error {
        ConfigError::InvalidMaxReplacements { value } => assert_eq!(value, 0),
        other => panic!("unexpected configuration error: {other}"),
    }
    drop(harness);
}
