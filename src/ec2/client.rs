/// EC2-backed implementation of `AmiLookup`.
///
/// The SDK is async; the command is not. Each lookup owns a current-thread
/// tokio runtime and blocks on every call, so nothing else in the crate needs
/// to know about futures.
use std::collections::{BTreeMap, BTreeSet};

use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::types::{Filter, Reservation, Tag};
use tokio::runtime::Runtime;
use tracing::debug;

use super::errors::Ec2Error;
use crate::ami::AmiLookup;
use crate::types::Edp;

/// Error codes `DescribeImages` returns for ids that do not resolve to an image.
const IMAGE_NOT_FOUND_CODES: &[&str] = &[
    "InvalidAMIID.NotFound",
    "InvalidAMIID.Malformed",
    "InvalidAMIID.Unavailable",
];

/// EC2 client plus the runtime that drives it.
pub struct Ec2AmiLookup {
    runtime: Runtime,
    client: Client,
}

impl Ec2AmiLookup {
    /// Load AWS configuration from the environment/profile chain and build a client.
    /// `region` pins the region instead of taking it from the chain.
    ///
    /// # Errors
    ///
    /// Returns `Ec2Error::Runtime` if the tokio runtime cannot be built.
    pub fn connect(region: Option<&str>) -> Result<Self, Ec2Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Ec2Error::Runtime)?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_owned()));
        }
        let config = runtime.block_on(loader.load());
        debug!(region = ?config.region(), "loaded AWS configuration");

        Ok(Self {
            runtime,
            client: Client::new(&config),
        })
    }
}

impl AmiLookup for Ec2AmiLookup {
    fn active_ami_for_edp(&self, edp: &Edp) -> Result<String, Ec2Error> {
        debug!(%edp, "describing running instances");
        let reservations: Vec<Reservation> = self
            .runtime
            .block_on(
                self.client
                    .describe_instances()
                    .set_filters(Some(edp_filters(edp)))
                    .into_paginator()
                    .items()
                    .send()
                    .collect::<Result<Vec<_>, _>>(),
            )
            .map_err(aws_sdk_ec2::Error::from)?;

        let images = distinct_images(&reservations);
        debug!(%edp, count = images.len(), "collected running image ids");
        single_image(edp, images)
    }

    fn tags_for_ami(&self, ami_id: &str) -> Result<BTreeMap<String, String>, Ec2Error> {
        debug!(ami_id, "describing image");
        let output = match self
            .runtime
            .block_on(self.client.describe_images().image_ids(ami_id).send())
        {
            Ok(output) => output,
            Err(err) if err.code().is_some_and(|c| IMAGE_NOT_FOUND_CODES.contains(&c)) => {
                return Err(Ec2Error::ImageNotFound {
                    reason: format!("{ami_id}: {}", err.message().unwrap_or("not found")),
                });
            }
            Err(err) => return Err(aws_sdk_ec2::Error::from(err).into()),
        };

        let image = output
            .images()
            .first()
            .ok_or_else(|| Ec2Error::ImageNotFound {
                reason: format!("{ami_id}: no such image"),
            })?;
        Ok(tag_map(image.tags()))
    }
}

/// Filters selecting running instances tagged with the EDP triple.
fn edp_filters(edp: &Edp) -> Vec<Filter> {
    [
        ("tag:environment", edp.environment.as_str()),
        ("tag:deployment", edp.deployment.as_str()),
        ("tag:play", edp.play.as_str()),
        ("instance-state-name", "running"),
    ]
    .into_iter()
    .map(|(name, value)| Filter::builder().name(name).values(value).build())
    .collect()
}

/// Distinct image ids across all instances in `reservations`, sorted.
fn distinct_images(reservations: &[Reservation]) -> BTreeSet<String> {
    reservations
        .iter()
        .flat_map(Reservation::instances)
        .filter_map(|instance| instance.image_id())
        .map(str::to_owned)
        .collect()
}

/// Exactly one image is "active"; zero or several is an error.
fn single_image(edp: &Edp, images: BTreeSet<String>) -> Result<String, Ec2Error> {
    if images.len() > 1 {
        return Err(Ec2Error::MultipleImagesFound {
            edp: edp.to_string(),
            images: images.into_iter().collect(),
        });
    }
    images
        .into_iter()
        .next()
        .ok_or_else(|| Ec2Error::ImageNotFound {
            reason: format!("no running instances tagged {edp}"),
        })
}

/// Tags as a map. Tags without a key are dropped; a missing value becomes "".
fn tag_map(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .filter_map(|tag| {
            tag.key()
                .map(|k| (k.to_owned(), tag.value().unwrap_or_default().to_owned()))
        })
        .collect()
}
