use action_output_env::*;

// Step inputs
env_var_req!(K1 -> API_TOKEN);
env_var_req!(K2 -> PROJECT_ID);
env_var_opt!(K3 -> BASE_LANGUAGE);

// Where the file sink appends its `key=value` line. Not checked for
// emptiness, an empty path fails when opened.
env_var_opt!(GITHUB_OUTPUT -> OUTPUT_PATH);

// `file` (default) or `console`
env_var_opt!(ACTION_OUTPUT_SINK -> SINK_KIND);
env_var_opt!(ACTION_OUTPUT_LOG_FILE -> LOG_FILE);


assert_req_env!(check_env_vars: API_TOKEN, PROJECT_ID);
