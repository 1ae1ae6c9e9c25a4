//! Spin up a throwaway Neo4j via testcontainers for integration tests.

use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::{GraphClient, GraphConfig};

const TEST_PASSWORD: &str = "ocean-test-pw";

/// Start a Neo4j container and return it with a connected client.
///
/// The container stops when the handle drops, so callers keep it alive for
/// the whole test.
pub async fn neo4j_container() -> (ContainerAsync<GenericImage>, GraphClient) {
    let image = GenericImage::new("neo4j", "5.26.0-community")
        .with_exposed_port(ContainerPort::Tcp(7687))
        .with_wait_for(WaitFor::message_on_stdout("Started."))
        .with_env_var("NEO4J_AUTH", format!("neo4j/{TEST_PASSWORD}"));

    let container: ContainerAsync<GenericImage> = image
        .start()
        .await
        .expect("Failed to start Neo4j container");

    let host_port = container
        .get_host_port_ipv4(7687)
        .await
        .expect("Failed to get Neo4j host port");

    let config = GraphConfig {
        uri: format!("bolt://127.0.0.1:{host_port}"),
        password: TEST_PASSWORD.to_string(),
        ..Default::default()
    };
    let client = GraphClient::connect(&config)
        .await
        .expect("Failed to connect to Neo4j");

    (container, client)
}
