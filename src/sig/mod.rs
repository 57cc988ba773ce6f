mod challenge;
pub use challenge::challenge;

mod proof;
pub use proof::{Proof, Statement};

mod threshold;
pub use threshold::{ProvenPartial, Share, ThresholdError, DST, DST0, DST1};

mod boldyreva;
pub use boldyreva::Boldyreva;

mod adaptive;
pub use adaptive::{AdaptiveBls, AdaptiveShare};
