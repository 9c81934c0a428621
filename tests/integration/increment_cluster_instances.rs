//! increment-cluster-instances read chain and launches against a recording cloud CLI

use blox_demo::commands::increment_cluster_instances::cluster_user_data;
use blox_demo::commands::IncrementClusterInstances;
use serde_json::{json, Value};

use crate::integration::{run_script, RecordingCloud, RecordingHttp, ScriptedPrompter};

fn read_chain() -> Vec<Value> {
    vec![
        json!({"clusters": [{"clusterName": "demo"}], "failures": []}),
        json!({"containerInstanceArns": ["arn:aws:ecs:us-east-1:1:container-instance/abc"]}),
        json!({"containerInstances": [{"ec2InstanceId": "i-0source"}]}),
        json!({"Reservations": [{"Instances": [{
            "ImageId": "ami-ecs",
            "InstanceType": "t2.micro",
            "KeyName": "demo-key",
            "SecurityGroups": [{"GroupId": "sg-1"}],
            "SubnetId": "subnet-1",
            "IamInstanceProfile": {"Arn": "arn:aws:iam::1:instance-profile/EcsInstanceProfile"}
        }]}]}),
    ]
}

fn launched(id: &str) -> Value {
    json!({"Instances": [{"InstanceId": id}]})
}

#[test]
fn test_launches_requested_number_of_instances() {
    let mut results = read_chain();
    results.push(launched("i-new1"));
    results.push(launched("i-new2"));
    let cloud = RecordingCloud::returning(results);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, out) = run_script(
        &IncrementClusterInstances,
        &["--cluster", "demo", "--num", "2", "--region", "us-east-1"],
        &cloud,
        &http,
        &mut prompter,
    );
    result.unwrap();

    let calls = cloud.call_args();
    assert_eq!(calls.len(), 6);
    assert_eq!(calls[0], vec!["ecs", "describe-clusters", "--clusters", "demo"]);
    assert_eq!(calls[1], vec!["ecs", "list-container-instances", "--cluster", "demo"]);
    assert_eq!(
        calls[2],
        vec![
            "ecs",
            "describe-container-instances",
            "--cluster",
            "demo",
            "--container-instances",
            "arn:aws:ecs:us-east-1:1:container-instance/abc"
        ]
    );
    assert_eq!(calls[3], vec!["ec2", "describe-instances", "--instance-ids", "i-0source"]);

    let user_data = cluster_user_data("demo");
    let expected_launch = vec![
        "ec2",
        "run-instances",
        "--image-id",
        "ami-ecs",
        "--instance-type",
        "t2.micro",
        "--user-data",
        user_data.as_str(),
        "--iam-instance-profile",
        "Name=\"EcsInstanceProfile\"",
        "--security-group-ids",
        "sg-1",
        "--key-name",
        "demo-key",
        "--subnet-id",
        "subnet-1",
    ];
    assert_eq!(calls[4], expected_launch);
    assert_eq!(calls[5], expected_launch);
    assert!(cloud
        .calls
        .borrow()
        .iter()
        .all(|call| call.region.as_deref() == Some("us-east-1")));

    assert!(out.ends_with("Created instance 'i-new1'.\nCreated instance 'i-new2'.\n"));
}

#[test]
fn test_missing_cluster_stops_the_chain() {
    let cloud = RecordingCloud::returning(vec![json!({"clusters": [], "failures": [{"reason": "MISSING"}]})]);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &IncrementClusterInstances,
        &["--cluster=ghost", "--num=1"],
        &cloud,
        &http,
        &mut prompter,
    );

    assert_eq!(
        blox_demo::cli::map_error(&result.unwrap_err()),
        "Error: Cluster 'ghost' does not exist."
    );
    assert_eq!(cloud.calls.borrow().len(), 1);
}

#[test]
fn test_cluster_without_instances() {
    let cloud = RecordingCloud::returning(vec![
        json!({"clusters": [{"clusterName": "empty"}]}),
        json!({"containerInstanceArns": []}),
    ]);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &IncrementClusterInstances,
        &["--cluster=empty", "--num=1"],
        &cloud,
        &http,
        &mut prompter,
    );
    assert_eq!(
        blox_demo::cli::map_error(&result.unwrap_err()),
        "Error: Cluster 'empty' does not contain any instances."
    );
}

#[test]
fn test_unknown_ec2_instance() {
    let mut results = read_chain();
    results[3] = json!({"Reservations": []});
    let cloud = RecordingCloud::returning(results);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &IncrementClusterInstances,
        &["--cluster=demo", "--num=1"],
        &cloud,
        &http,
        &mut prompter,
    );
    assert_eq!(
        blox_demo::cli::map_error(&result.unwrap_err()),
        "Error: Could not retrieve ec2 instance 'i-0source'."
    );
    assert_eq!(cloud.calls.borrow().len(), 4);
}

#[test]
fn test_unknown_container_instance() {
    let mut results = read_chain();
    results.truncate(2);
    results.push(json!({"containerInstances": [], "failures": [{"reason": "MISSING"}]}));
    let cloud = RecordingCloud::returning(results);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &IncrementClusterInstances,
        &["--cluster=demo", "--num=1"],
        &cloud,
        &http,
        &mut prompter,
    );
    assert_eq!(
        blox_demo::cli::map_error(&result.unwrap_err()),
        "Error: Could not retrieve container instance \
         'arn:aws:ecs:us-east-1:1:container-instance/abc'."
    );
    assert_eq!(cloud.calls.borrow().len(), 3);
}

#[test]
fn test_launch_without_instance_fails() {
    let mut results = read_chain();
    results.push(json!({"Instances": [], "ReservationId": "r-1"}));
    let cloud = RecordingCloud::returning(results);
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, out) = run_script(
        &IncrementClusterInstances,
        &["--cluster=demo", "--num=2"],
        &cloud,
        &http,
        &mut prompter,
    );
    assert_eq!(
        blox_demo::cli::map_error(&result.unwrap_err()),
        "Error: run-instances did not return an instance."
    );
    // the second launch is never attempted
    assert_eq!(cloud.calls.borrow().len(), 5);
    assert!(!out.contains("Created instance"));
}

#[test]
fn test_invalid_count_makes_no_call() {
    let cloud = RecordingCloud::default();
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, _) = run_script(
        &IncrementClusterInstances,
        &["--cluster=demo", "--num=lots"],
        &cloud,
        &http,
        &mut prompter,
    );
    assert_eq!(result.unwrap_err().exit_code(), 1);
    assert!(cloud.calls.borrow().is_empty());
}

#[test]
fn test_zero_count_only_reads() {
    let cloud = RecordingCloud::returning(read_chain());
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::default();

    let (result, out) = run_script(
        &IncrementClusterInstances,
        &["--cluster=demo", "--num=0"],
        &cloud,
        &http,
        &mut prompter,
    );
    result.unwrap();
    assert_eq!(cloud.calls.borrow().len(), 4);
    assert!(!out.contains("Created instance"));
}

#[test]
fn test_both_options_are_prompted() {
    let cloud = RecordingCloud::returning(read_chain());
    let http = RecordingHttp::default();
    let mut prompter = ScriptedPrompter::answering(&["demo", "0"]);

    let (result, _) = run_script(&IncrementClusterInstances, &[], &cloud, &http, &mut prompter);
    result.unwrap();
    assert_eq!(
        prompter.asked,
        vec![
            "Enter ECS cluster name".to_string(),
            "Enter number of instances to increment by".to_string()
        ]
    );
}
