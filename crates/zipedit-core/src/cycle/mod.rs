//! Interactive edit cycle: pick a member, edit it externally, write it
//! back.
//!
//! [`EditCycle`] drives the loop over two seams. A [`MemberSelector`]
//! chooses what to edit ([`PromptSelector`] is the numbered text prompt)
//! and a [`CompletionWait`] blocks until the edit is finished
//! ([`AutomaticWait`] watches the filesystem, [`ManualWait`] asks the
//! user). The recompression runs inside the wait's one-shot completion
//! callback, so the archive is never rewritten before the edit is judged
//! complete.

mod config;
mod orchestrator;
mod selector;
mod terminal;
mod wait;
mod workdir;

pub use config::CycleConfig;
pub use config::DEFAULT_WORKING_DIR;
pub use config::WaitMode;
pub use orchestrator::CycleOutcome;
pub use orchestrator::EditCycle;
pub use orchestrator::ExitReason;
pub use orchestrator::SessionReport;
pub use selector::MemberSelector;
pub use selector::PromptSelector;
pub use selector::QUIT_KEYWORD;
pub use selector::Selection;
pub use terminal::SharedTerminal;
pub use terminal::Terminal;
pub use wait::AutomaticWait;
pub use wait::CompletionWait;
pub use wait::ManualWait;
pub use workdir::WorkingDir;
