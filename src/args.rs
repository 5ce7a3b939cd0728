use crate::auth_mode;
use clap::Parser;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "https://openshift.default.svc.cluster.local";
pub const DEFAULT_TOKEN_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "webserver_config.py";
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Arguments {
    /// Requested authentication mode. Only `openshift` generates a configuration
    #[arg(long, env = "AUTH_TYPE")]
    pub auth_type: Option<String>,

    /// Airflow home directory, where `webserver_config.py` gets written
    #[arg(long, env = "AIRFLOW_HOME")]
    pub airflow_home: Option<PathBuf>,

    /// Role assigned to users on their first sign in
    #[arg(long, env = "AUTH_USER_REGISTRATION_ROLE")]
    pub registration_role: Option<String>,

    /// Base url of the OpenShift API and OAuth server
    #[arg(long, default_value = DEFAULT_SERVER_URL, env = "CONFIGURE_AUTH_SERVER_URL")]
    pub server_url: Url,

    /// Service account token. Used to look up the client id and reused as the client secret
    #[arg(long, default_value = DEFAULT_TOKEN_PATH, env = "CONFIGURE_AUTH_TOKEN_PATH")]
    pub token_path: PathBuf,

    /// Additional PEM root certificate to trust, e.g. the service account `ca.crt`
    #[arg(long, env = "CONFIGURE_AUTH_CA_CERT")]
    pub ca_cert: Option<PathBuf>,

    /// Default webserver configuration. When omitted, it's looked up in the python site-packages
    #[arg(long, env = "CONFIGURE_AUTH_DEFAULT_CONFIG")]
    pub default_config: Option<PathBuf>,

    /// Python interpreter used to find the site-packages directory
    #[arg(long, default_value = DEFAULT_PYTHON, env = "CONFIGURE_AUTH_PYTHON")]
    pub python: String,

    /// Name of the generated file inside the Airflow home directory
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE_NAME, env = "CONFIGURE_AUTH_OUTPUT_FILE_NAME")]
    pub output_file_name: String,

    /// Timeout of each HTTP call in seconds. No timeout by default
    #[arg(long, env = "CONFIGURE_AUTH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Debug mode. Equivalent of `RUST_LOG=debug`
    // main scans argv for it before parsing, so the logger is up while arguments are read
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

impl Arguments {
    pub fn is_openshift_auth(&self) -> bool {
        auth_mode::is_supported(self.auth_type.as_deref())
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Arguments {
            auth_type: None,
            airflow_home: None,
            registration_role: None,
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            ca_cert: None,
            default_config: None,
            python: DEFAULT_PYTHON.to_owned(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_owned(),
            timeout: None,
            debug: false,
        }
    }
}

fn is_help_or_version(arg: &str) -> bool {
    matches!(arg, "-h" | "--help" | "-V" | "--version")
}

/// `--auth-type` from the command line, otherwise the `AUTH_TYPE` value.
/// Only this option is looked at, the rest of `argv` isn't validated.
pub fn requested_auth_type<I>(argv: I, env_auth_type: Option<String>) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut argv = argv.into_iter();
    let mut from_args = None;

    while let Some(arg) = argv.next() {
        if arg == "--" {
            break;
        } else if arg == "--auth-type" {
            from_args = argv.next();
        } else if let Some(value) = arg.strip_prefix("--auth-type=") {
            from_args = Some(value.to_owned());
        }
    }

    from_args.or(env_auth_type)
}

pub struct Args;

impl Args {
    /// `None` when the run isn't for OpenShift authentication. The mode is
    /// checked before the full parse, so a skipped run can't fail on other options.
    pub fn parse() -> Option<Arguments> {
        if dotenv().is_ok() {
            log::debug!("Loaded variables from .env");
        }

        let argv: Vec<String> = env::args().skip(1).collect();
        if !argv.iter().any(|arg| is_help_or_version(arg)) {
            let auth_type = requested_auth_type(argv, env::var("AUTH_TYPE").ok());

            if !auth_mode::is_supported(auth_type.as_deref()) {
                log::info!(
                    "AUTH_TYPE={:?} doesn't enable OpenShift authentication. Nothing to do",
                    auth_type
                );
                return None;
            }
        }

        Some(Arguments::parse())
    }
}
