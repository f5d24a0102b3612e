pub mod launcher;

pub use launcher::{
    AssembledLaunch, BuildError, CreateTokenParams, FetchTarget, LaunchConfig, LaunchError,
    LaunchReceipt, LaunchStage, PreparedLaunch, TokenLauncher,
};
