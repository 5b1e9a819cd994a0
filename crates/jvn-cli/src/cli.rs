use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use jvn_domain::{Platform, Privacy};

pub const JVN_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nCommands:\n{subcommands}\n\nGlobal options:\n{options}\n";

pub const JVN_BEFORE_HELP: &str = concat!(
    "jvn ",
    env!("CARGO_PKG_VERSION"),
    " – Capture conda environments and commit notebooks\n\n",
    "\x1b[1;36mEnvironment\x1b[0m\n",
    "  env export       Print the active conda environment without build strings.\n",
    "  env upload       Upload environment.yml plus per-platform manifests to a project.\n\n",
    "\x1b[1;36mNotebooks\x1b[0m\n",
    "  commit           Commit a captured notebook to a project with a privacy level.\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "jvn",
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = JVN_BEFORE_HELP,
    help_template = JVN_HELP_TEMPLATE
)]
#[allow(clippy::struct_excessive_bools)]
pub struct JvnCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vvv reaches trace)", global = true)]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[arg(
        long,
        value_name = "URL",
        help = "API base URL (defaults to JVN_API_URL, then https://api.jovian.ai)",
        global = true
    )]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(subcommand, about = "Export or upload the active conda environment.")]
    Env(EnvCommand),
    #[command(
        about = "Commit a captured notebook to a project.",
        override_usage = "jvn commit <PROJECT> [--privacy LEVEL] [--file-id ID]"
    )]
    Commit(CommitArgs),
}

#[derive(Subcommand, Debug)]
pub enum EnvCommand {
    #[command(
        about = "Print the active conda environment (conda env export --no-builds).",
        override_usage = "jvn env export [--name ENV]"
    )]
    Export(EnvExportArgs),
    #[command(
        about = "Upload environment.yml and per-platform manifests to a project.",
        override_usage = "jvn env upload <RESOURCE_ID> [--version V] [--name ENV] [--platform OS]"
    )]
    Upload(EnvUploadArgs),
}

#[derive(Args, Debug)]
pub struct EnvExportArgs {
    #[arg(
        short,
        long,
        value_name = "ENV",
        help = "Environment to export instead of $CONDA_DEFAULT_ENV"
    )]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct EnvUploadArgs {
    #[arg(value_name = "RESOURCE_ID", help = "Project the manifests are attached to")]
    pub resource_id: String,
    #[arg(long, value_name = "V", help = "Project version to attach the manifests to")]
    pub version: Option<String>,
    #[arg(
        short,
        long,
        value_name = "ENV",
        help = "Environment to export instead of $CONDA_DEFAULT_ENV"
    )]
    pub name: Option<String>,
    #[arg(
        long,
        value_enum,
        value_name = "OS",
        help = "Record the fresh manifest under this platform instead of the host's"
    )]
    pub platform: Option<PlatformArg>,
}

#[derive(Args, Debug)]
pub struct CommitArgs {
    #[arg(value_name = "PROJECT", help = "Project name, optionally prefixed with an owner (owner/name)")]
    pub project: String,
    #[arg(long, value_enum, default_value_t = PrivacyArg::Auto, help = "Visibility of the commit")]
    pub privacy: PrivacyArg,
    #[arg(
        long,
        value_name = "ID",
        help = "File reference handed over by the notebook host"
    )]
    pub file_id: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PrivacyArg {
    Auto,
    Secret,
    Private,
    Public,
}

impl From<PrivacyArg> for Privacy {
    fn from(value: PrivacyArg) -> Self {
        match value {
            PrivacyArg::Auto => Privacy::Auto,
            PrivacyArg::Secret => Privacy::Secret,
            PrivacyArg::Private => Privacy::Private,
            PrivacyArg::Public => Privacy::Public,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Linux,
    Macos,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Linux => Platform::Linux,
            PlatformArg::Macos => Platform::Macos,
            PlatformArg::Windows => Platform::Windows,
        }
    }
}
