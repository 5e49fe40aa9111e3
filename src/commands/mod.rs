/// Command dispatch: wires the EC2 client into the `retrieve` command.
pub mod retrieve;

use crate::ami::AmiError;
use crate::cli::Cli;
use crate::ec2::Ec2AmiLookup;

/// Connect to EC2 and run the command.
///
/// # Errors
///
/// Returns `AmiError` on any failure.
pub fn dispatch(cli: &Cli) -> Result<(), AmiError> {
    let lookup = Ec2AmiLookup::connect(cli.region.as_deref())?;
    retrieve::run(cli, &lookup)
}
