/// EC2 API layer.
pub mod client;
pub mod errors;

pub use client::Ec2AmiLookup;
pub use errors::Ec2Error;
