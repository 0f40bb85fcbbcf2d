use std::io::{Result as IOResult, Write};

use action_output_env::{EnvSource, EnvVarErr};

use crate::env::{api_token, base_language, check_env_vars, project_id, CHECK_ENV_VARS_LEN};

/// The step's inputs, read once at start and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub api_token: String,
    pub project_id: String,
    /// May be empty.
    pub base_language: String,
}

impl ActionInputs {
    /// Reads the inputs from `env`, failing with the names of every required
    /// input that is empty or unset.
    pub fn from_env(env: &impl EnvSource) -> Result<Self, EnvVarErr<CHECK_ENV_VARS_LEN>> {
        check_env_vars(env)?;

        Ok(Self {
            api_token: api_token(env),
            project_id: project_id(env),
            base_language: base_language(env),
        })
    }

    /// Echoes the inputs, one labelled line each, in a fixed order.
    pub fn report(&self, out: &mut impl Write) -> IOResult<()> {
        writeln!(out, "API Token: {}", self.api_token)?;
        writeln!(out, "Project ID: {}", self.project_id)?;
        writeln!(out, "Base Language: {}", self.base_language)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use action_output_env::MapEnv;

    #[test]
    fn reads_all_three_inputs() {
        let env = MapEnv::new()
            .with("K1", "tok")
            .with("K2", "proj")
            .with("K3", "en");

        let inputs = ActionInputs::from_env(&env).unwrap();
        assert_eq!(inputs, ActionInputs {
            api_token: "tok".into(),
            project_id: "proj".into(),
            base_language: "en".into(),
        });
    }

    #[test]
    fn optional_input_may_be_absent() {
        let env = MapEnv::new().with("K1", "tok").with("K2", "proj");
        assert_eq!(ActionInputs::from_env(&env).unwrap().base_language, "");
    }

    #[test]
    fn empty_or_absent_required_inputs_are_rejected() {
        let env = MapEnv::new().with("K1", "").with("K3", "en");
        let missing = ActionInputs::from_env(&env).unwrap_err();
        assert_eq!(missing.missing().collect::<Vec<_>>(), ["K1", "K2"]);

        let env = MapEnv::new().with("K1", "tok");
        let missing = ActionInputs::from_env(&env).unwrap_err();
        assert_eq!(missing.to_string(), "K2");
    }

    #[test]
    fn report_prints_empty_optional_input() {
        let inputs = ActionInputs {
            api_token: "tok".into(),
            project_id: "proj".into(),
            base_language: String::new(),
        };
        let mut out = Vec::new();
        inputs.report(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "API Token: tok\nProject ID: proj\nBase Language: \n",
        );
    }
}
