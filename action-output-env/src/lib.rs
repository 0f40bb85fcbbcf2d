//! Environment lookup for action steps.
//!
//! Inputs are read through [`EnvSource`] instead of `std::env` directly, so a
//! step can be driven from the real process environment ([`ProcessEnv`]) or
//! from a plain map ([`MapEnv`]) in tests.
//!
//! Keys are declared with [`env_var_req!`] and [`env_var_opt!`], and a check
//! over the required ones is generated with [`assert_req_env!`]:
//!
//! ```
//! use action_output_env::*;
//!
//! env_var_req!(K1 -> API_TOKEN);
//! env_var_opt!(K3 -> BASE_LANGUAGE);
//!
//! assert_req_env!(check_env_vars: API_TOKEN);
//!
//! let env = MapEnv::new().with("K1", "tok");
//! assert!(check_env_vars(&env).is_ok());
//! assert_eq!(api_token(&env), "tok");
//! assert_eq!(base_language(&env), "");
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt::{Display, Debug};
pub use paste::paste;

#[macro_export]
macro_rules! env_var_req {
    ($env_name:ident $(-> $short_name:ident)?) => {
        $crate::env_var_req!(@declare required, $env_name, $($short_name)? $env_name);
    };
    (@declare $ctor:ident, $env_name:ident, $var_name:ident $($extra:ident)?) => {
        $crate::paste! {
            pub const $var_name: $crate::EnvKey = $crate::EnvKey::$ctor(stringify!($env_name));

            pub fn [<$var_name:lower>](env: &impl $crate::EnvSource) -> String {
                $var_name.read(env)
            }
        }
    };
}

#[macro_export]
macro_rules! env_var_opt {
    ($env_name:ident $(-> $short_name:ident)?) => {
        $crate::env_var_req!(@declare optional, $env_name, $($short_name)? $env_name);
    };
}

#[macro_export]
macro_rules! assert_req_env {
    ($check_name_fn:ident: $($names:ident),+) => {
        $crate::paste! {
            pub const [<$check_name_fn:upper _LEN>]: usize = [$(stringify!($names)),+].len();

            pub fn $check_name_fn(
                env: &impl $crate::EnvSource,
            ) -> Result<(), $crate::EnvVarErr<[<$check_name_fn:upper _LEN>]>> {
                let errs = [$($names.check(env).err()),+];
                if errs.iter().any(Option::is_some) {
                    Err($crate::EnvVarErr::new(errs))
                } else {
                    Ok(())
                }
            }
        }
    };
}


/// Read-only key to string mapping that inputs are looked up in.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;

    /// Raw value, for inputs such as paths that need not be unicode.
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.var(key).map(OsString::from)
    }

    /// An absent key reads the same as an empty value.
    fn var_or_empty(&self, key: &str) -> String {
        self.var(key).unwrap_or_default()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    /// Non-unicode values are kept, with invalid sequences replaced.
    fn var(&self, key: &str) -> Option<String> {
        self.var_os(key).map(|value| value.to_string_lossy().into_owned())
    }
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv(HashMap<String, String>);

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.var(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvKey {
    name: &'static str,
    required: bool,
}

impl EnvKey {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }
    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub fn read(&self, env: &impl EnvSource) -> String {
        env.var_or_empty(self.name)
    }

    pub fn read_os(&self, env: &impl EnvSource) -> OsString {
        env.var_os(self.name).unwrap_or_default()
    }

    /// Fails with the variable name when a required key is empty or unset.
    /// Optional keys always pass.
    pub fn check(&self, env: &impl EnvSource) -> Result<String, &'static str> {
        let value = self.read(env);
        if self.required && value.is_empty() {
            Err(self.name)
        } else {
            Ok(value)
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EnvVarErr<const T: usize>([Option<&'static str>; T]);

impl<const T: usize> EnvVarErr<T> {
    pub fn new(inner: [Option<&'static str>; T]) -> Self {
        Self(inner)
    }

    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().filter_map(|name| *name)
    }
}
impl<const T: usize> Display for EnvVarErr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.missing()
            .enumerate()
            .try_for_each(
                |(idx, var_name)| if idx == 0 {
                    write!(f, "{var_name}")
                } else {
                    write!(f, ", {var_name}")
                }
            )
    }
}
impl<const T: usize> Debug for EnvVarErr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
impl<const T: usize> std::error::Error for EnvVarErr<T> {}
