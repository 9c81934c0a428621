//! `increment-cluster-instances`: launch more EC2 instances into an ECS cluster,
//! cloned from the configuration of one of its existing container instances.

use super::{decode, Script};
use crate::args::{OptionSpec, ParsedParameters};
use crate::cli::RunContext;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::process::{CliRequest, CloudCli};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::io::Write;
use std::sync::OnceLock;
use tracing::{debug, info};

pub struct IncrementClusterInstances;

/// Cloud CLI calls bound to the region chosen on the command line.
struct RegionalCloud<'a> {
    cli: &'a dyn CloudCli,
    region: Option<&'a str>,
}

impl RegionalCloud<'_> {
    fn call<I, S>(&self, args: I) -> Result<Value, DemoError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cli
            .invoke(&CliRequest::new(args).with_region(self.region))
    }
}

#[derive(Debug, Deserialize)]
struct DescribeClusters {
    #[serde(default)]
    clusters: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListContainerInstances {
    #[serde(default)]
    container_instance_arns: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeContainerInstances {
    #[serde(default)]
    container_instances: Vec<ContainerInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContainerInstance {
    ec2_instance_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeInstances {
    #[serde(default)]
    reservations: Vec<Reservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Reservation {
    #[serde(default)]
    instances: Vec<Ec2Instance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Ec2Instance {
    image_id: String,
    instance_type: String,
    #[serde(default)]
    key_name: Option<String>,
    #[serde(default)]
    security_groups: Vec<SecurityGroup>,
    #[serde(default)]
    subnet_id: Option<String>,
    #[serde(default)]
    iam_instance_profile: Option<IamInstanceProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SecurityGroup {
    group_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IamInstanceProfile {
    arn: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RunInstances {
    #[serde(default)]
    instances: Vec<LaunchedInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LaunchedInstance {
    instance_id: String,
}

/// Settings copied from an existing cluster instance for each new launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTemplate {
    pub image_id: String,
    pub instance_type: String,
    pub security_group: Option<String>,
    pub key_name: Option<String>,
    pub subnet_id: Option<String>,
    pub instance_profile: Option<String>,
}

impl LaunchTemplate {
    fn from_instance(instance: Ec2Instance) -> Self {
        Self {
            image_id: instance.image_id,
            instance_type: instance.instance_type,
            security_group: instance
                .security_groups
                .into_iter()
                .next()
                .map(|group| group.group_id),
            key_name: instance.key_name,
            subnet_id: instance.subnet_id,
            instance_profile: instance
                .iam_instance_profile
                .and_then(|profile| instance_profile_name(&profile.arn)),
        }
    }

    /// Arguments for one `ec2 run-instances` call.
    pub fn run_instances_args(&self, user_data: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "ec2",
            "run-instances",
            "--image-id",
            self.image_id.as_str(),
            "--instance-type",
            self.instance_type.as_str(),
            "--user-data",
            user_data,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(profile) = &self.instance_profile {
            args.push("--iam-instance-profile".to_string());
            args.push(format!("Name=\"{}\"", profile));
        }
        if let Some(group) = &self.security_group {
            args.push("--security-group-ids".to_string());
            args.push(group.clone());
        }
        if let Some(key) = &self.key_name {
            args.push("--key-name".to_string());
            args.push(key.clone());
        }
        if let Some(subnet) = &self.subnet_id {
            args.push("--subnet-id".to_string());
            args.push(subnet.clone());
        }
        args
    }
}

/// Instance profile name: the text after the last `/` of its ARN.
pub fn instance_profile_name(arn: &str) -> Option<String> {
    static PROFILE_ARN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PROFILE_ARN.get_or_init(|| Regex::new(r"^(.+)/(.+)$").expect("valid profile pattern"));
    pattern
        .captures(arn)
        .and_then(|captures| captures.get(2))
        .map(|name| name.as_str().to_string())
}

/// Base64 user data that joins a new instance to `cluster`.
pub fn cluster_user_data(cluster: &str) -> String {
    STANDARD.encode(format!(
        "#!/bin/bash\necho ECS_CLUSTER={} >> /etc/ecs/ecs.config\n",
        cluster
    ))
}

fn parse_count(raw: &str) -> Result<u32, DemoError> {
    raw.parse::<u32>().map_err(|_| {
        DemoError::Usage(format!(
            "number of instances must be a non-negative integer, got '{}'.",
            raw
        ))
    })
}

/// Read chain from cluster name to the launch settings of its first instance.
fn discover_template(cloud: &RegionalCloud<'_>, cluster: &str) -> Result<LaunchTemplate, DemoError> {
    let clusters: DescribeClusters =
        decode(&cloud.call(["ecs", "describe-clusters", "--clusters", cluster])?)?;
    if clusters.clusters.is_empty() {
        return Err(DemoError::Cloud(format!(
            "Cluster '{}' does not exist.",
            cluster
        )));
    }

    let listed: ListContainerInstances =
        decode(&cloud.call(["ecs", "list-container-instances", "--cluster", cluster])?)?;
    let container_arn = listed.container_instance_arns.into_iter().next().ok_or_else(|| {
        DemoError::Cloud(format!(
            "Cluster '{}' does not contain any instances.",
            cluster
        ))
    })?;

    let described: DescribeContainerInstances = decode(&cloud.call([
        "ecs",
        "describe-container-instances",
        "--cluster",
        cluster,
        "--container-instances",
        container_arn.as_str(),
    ])?)?;
    let ec2_instance_id = described
        .container_instances
        .into_iter()
        .next()
        .map(|instance| instance.ec2_instance_id)
        .ok_or_else(|| {
            DemoError::Cloud(format!(
                "Could not retrieve container instance '{}'.",
                container_arn
            ))
        })?;

    let instances: DescribeInstances = decode(&cloud.call([
        "ec2",
        "describe-instances",
        "--instance-ids",
        ec2_instance_id.as_str(),
    ])?)?;
    let instance = instances
        .reservations
        .into_iter()
        .next()
        .and_then(|reservation| reservation.instances.into_iter().next())
        .ok_or_else(|| {
            DemoError::Cloud(format!(
                "Could not retrieve ec2 instance '{}'.",
                ec2_instance_id
            ))
        })?;

    let template = LaunchTemplate::from_instance(instance);
    debug!(source = %ec2_instance_id, template = ?template, "Harvested launch template");
    Ok(template)
}

impl Script for IncrementClusterInstances {
    fn name(&self) -> &'static str {
        "increment-cluster-instances"
    }

    fn description(&self) -> &'static str {
        "Increment Cluster Instances"
    }

    fn options(&self, _raw_args: &[String], _config: &DemoConfig) -> Vec<OptionSpec> {
        vec![
            OptionSpec::value("cluster", "cluster", "ECS cluster name"),
            OptionSpec::value("num", "num", "number of instances to increment by"),
        ]
    }

    fn run(
        &self,
        params: &ParsedParameters,
        ctx: &RunContext<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DemoError> {
        let cluster = params.require("cluster")?;
        let count = parse_count(params.require("num")?)?;
        let cloud = RegionalCloud {
            cli: ctx.cloud,
            region: params.region(),
        };

        let template = discover_template(&cloud, cluster)?;
        let run_args = template.run_instances_args(&cluster_user_data(cluster));

        for _ in 0..count {
            let launched: RunInstances = decode(&cloud.call(run_args.iter().cloned())?)?;
            let instance = launched.instances.into_iter().next().ok_or_else(|| {
                DemoError::Cloud("run-instances did not return an instance.".to_string())
            })?;
            info!(cluster, instance = %instance.instance_id, "Launched instance");
            writeln!(out, "Created instance '{}'.", instance.instance_id)?;
        }
        Ok(())
    }
}
