pub mod create;
pub mod default;
pub mod init;
pub mod list;
pub mod seed;
pub mod template;

use codeforge::config::home_dir;
use codeforge::error::Result;
use codeforge::Workspace;

/// Open the workspace in the codeforge home, creating config.json on first use.
fn workspace() -> Result<Workspace> {
    Workspace::open_or_init(home_dir()?)
}
