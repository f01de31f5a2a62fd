pub mod error;
pub mod group;
pub mod hash;
pub mod scalar;
pub mod shamir;
pub mod types;
pub mod nizk;
pub mod keygen;
pub mod randutil;
pub mod commitment;
pub mod dealer;
pub mod participant;
pub mod verify;
pub mod reconstruct;

pub use dealer::distribute;
pub use error::{PvssError, Result};
pub use group::{Group, P256Group, RistrettoGroup};
pub use keygen::{setup_p256, setup_ristretto};
pub use participant::Participant;
pub use reconstruct::{reconstruct_secret, reconstruct_verified};
pub use types::{DecryptedShare, DistributionBox, GroupParameters, Share};
pub use verify::{verify_decrypted_share, verify_distribution_shares};
