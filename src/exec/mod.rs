pub mod locate;
pub mod shell;

pub use locate::find_shell;
pub use shell::{execute_shell, ExecResult};
