pub mod config;
pub mod import;
pub mod keygen;
pub mod reconcile;
pub mod token;
pub mod verify;

pub use import::{run_import, ImportSource};
pub use keygen::run_keygen;
pub use reconcile::run_reconcile;
pub use token::{print_signed, print_totp};
pub use verify::run_verify;
