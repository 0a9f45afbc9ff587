//! Prompt strategies: how a graph snapshot becomes a completion request.
//!
//! Every strategy validates its input before touching the network, so an
//! empty graph or unknown target never costs a request.

use std::sync::Arc;

use async_trait::async_trait;
use mindmap_graph::{Edge, Node, NodeId, build_context};
use tracing::debug;

use crate::client::SuggestionClient;
use crate::config::StrategyKind;
use crate::error::{Result, SuggestError};
use crate::prompt::Prompt;

/// Default model for [`ContextualStrategy`].
pub const CONTEXTUAL_MODEL: &str = "mistral-7b-instruct-v0.1";

/// Default model for [`TopicListStrategy`].
pub const TOPIC_LIST_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Turns a graph snapshot and a target topic into a suggested label.
#[async_trait]
pub trait SuggestionStrategy: Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Build the prompt for `target`, or explain why there is nothing to ask.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidInput`] for an empty graph, a target
    /// that is not in `nodes`, or an empty prompt body.
    fn prompt(&self, nodes: &[Node], edges: &[Edge], target: &NodeId) -> Result<Prompt>;

    /// Send the request and return the suggested label.
    ///
    /// # Errors
    ///
    /// Returns any [`SuggestError`].
    async fn suggest(&self, nodes: &[Node], edges: &[Edge], target: &NodeId) -> Result<String>;
}

fn find_target<'a>(nodes: &'a [Node], target: &NodeId) -> Result<&'a Node> {
    if nodes.is_empty() {
        return Err(SuggestError::invalid_input("graph is empty"));
    }
    nodes
        .iter()
        .find(|n| n.id() == target)
        .ok_or_else(|| SuggestError::invalid_input(format!("unknown target node '{target}'")))
}

/// Describes the target's parents, siblings and children.
#[derive(Debug, Clone)]
pub struct ContextualStrategy {
    client: Arc<SuggestionClient>,
}

impl ContextualStrategy {
    pub const fn new(client: Arc<SuggestionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SuggestionStrategy for ContextualStrategy {
    fn name(&self) -> &'static str {
        "contextual"
    }

    fn prompt(&self, nodes: &[Node], edges: &[Edge], target: &NodeId) -> Result<Prompt> {
        find_target(nodes, target)?;
        let context = build_context(nodes, edges, target);
        if context.trim().is_empty() {
            return Err(SuggestError::invalid_input("context is empty"));
        }
        Ok(Prompt::contextual(&context))
    }

    async fn suggest(&self, nodes: &[Node], edges: &[Edge], target: &NodeId) -> Result<String> {
        let prompt = self.prompt(nodes, edges, target)?;
        debug!(strategy = self.name(), target = %target, "Prompt built");
        self.client
            .complete(self.client.model_or(CONTEXTUAL_MODEL), &prompt)
            .await
    }
}

/// Lists every label in the map; edges are ignored.
#[derive(Debug, Clone)]
pub struct TopicListStrategy {
    client: Arc<SuggestionClient>,
}

impl TopicListStrategy {
    pub const fn new(client: Arc<SuggestionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SuggestionStrategy for TopicListStrategy {
    fn name(&self) -> &'static str {
        "topic-list"
    }

    fn prompt(&self, nodes: &[Node], _edges: &[Edge], target: &NodeId) -> Result<Prompt> {
        let focus = find_target(nodes, target)?;
        Ok(Prompt::topic_list(nodes.iter().map(Node::label), focus.label()))
    }

    async fn suggest(&self, nodes: &[Node], edges: &[Edge], target: &NodeId) -> Result<String> {
        let prompt = self.prompt(nodes, edges, target)?;
        debug!(strategy = self.name(), target = %target, "Prompt built");
        self.client
            .complete(self.client.model_or(TOPIC_LIST_MODEL), &prompt)
            .await
    }
}

/// The strategy selected by `client`'s configuration.
pub fn from_config(client: Arc<SuggestionClient>) -> Arc<dyn SuggestionStrategy> {
    match client.config().strategy {
        StrategyKind::Contextual => Arc::new(ContextualStrategy::new(client)),
        StrategyKind::TopicList => Arc::new(TopicListStrategy::new(client)),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::config::SuggestionConfig;
    use mindmap_graph::{EdgeOptions, NodeData, NodeSize, Position};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn id(s: &str) -> NodeId {
        NodeId::new(s).unwrap()
    }

    fn travel_graph() -> (Vec<Node>, Vec<Edge>) {
        let nodes = [("1", "Travel"), ("2", "Packing"), ("3", "Flights")]
            .into_iter()
            .map(|(i, l)| Node::new(id(i), Position::origin(), NodeData::new(l, NodeSize::Small)))
            .collect();
        let edges = vec![
            Edge::new(id("1"), id("2"), EdgeOptions::default()).unwrap(),
            Edge::new(id("1"), id("3"), EdgeOptions::default()).unwrap(),
        ];
        (nodes, edges)
    }

    fn offline_client() -> Arc<SuggestionClient> {
        Arc::new(SuggestionClient::with_config(SuggestionConfig::with_url("http://127.0.0.1:9")).unwrap())
    }

    #[test]
    fn test_contextual_prompt_uses_neighbourhood() {
        let (nodes, edges) = travel_graph();
        let prompt = ContextualStrategy::new(offline_client())
            .prompt(&nodes, &edges, &id("2"))
            .unwrap();
        assert!(prompt.user.contains("Parent topics: \"Travel\""));
        assert!(prompt.user.contains("Related topics: \"Flights\""));
    }

    #[test]
    fn test_topic_list_prompt_lists_all_labels() {
        let (nodes, edges) = travel_graph();
        let prompt = TopicListStrategy::new(offline_client())
            .prompt(&nodes, &edges, &id("1"))
            .unwrap();
        assert!(prompt.user.contains("topics: Travel, Packing, Flights"));
        assert!(prompt.user.contains("parent topic \"Travel\""));
    }

    #[test]
    fn test_invalid_inputs() {
        let strategy = ContextualStrategy::new(offline_client());
        let (nodes, edges) = travel_graph();

        let empty = strategy.prompt(&[], &[], &id("1"));
        assert!(matches!(empty, Err(SuggestError::InvalidInput { .. })));

        let unknown = strategy.prompt(&nodes, &edges, &id("42"));
        assert!(matches!(unknown, Err(SuggestError::InvalidInput { .. })));
    }

    #[test]
    fn test_from_config_selects_strategy() {
        let client = Arc::new(
            SuggestionClient::with_config(
                SuggestionConfig::default().strategy(StrategyKind::TopicList),
            )
            .unwrap(),
        );
        assert_eq!(from_config(client).name(), "topic-list");
        assert_eq!(from_config(offline_client()).name(), "contextual");
    }

    #[tokio::test]
    async fn test_unknown_target_sends_no_request() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = Arc::new(SuggestionClient::with_config(SuggestionConfig::with_url(
            mock_server.uri(),
        ))?);
        let (nodes, edges) = travel_graph();

        let result = ContextualStrategy::new(client)
            .suggest(&nodes, &edges, &id("missing"))
            .await;

        assert!(matches!(result, Err(SuggestError::InvalidInput { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_topic_list_uses_its_model() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "model": TOPIC_LIST_MODEL })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "Visas" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Arc::new(SuggestionClient::with_config(SuggestionConfig::with_url(
            mock_server.uri(),
        ))?);
        let (nodes, edges) = travel_graph();

        let suggestion = TopicListStrategy::new(client)
            .suggest(&nodes, &edges, &id("1"))
            .await?;

        assert_eq!(suggestion, "Visas");
        Ok(())
    }
}
