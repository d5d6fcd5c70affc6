use crate::{messaging::config::RabbitMqConfig, model::records::RecordOutcome};
use chrono::{DateTime, Utc};
use lapin::{
    options::{BasicPublishOptions, ExchangeDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Failed to connect to RabbitMQ: {0}")]
    ConnectionError(#[from] lapin::Error),

    #[error("Failed to serialize message: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Publisher not initialized")]
    NotInitialized
}

/// Message sent after one match has been recorded and rated.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchProcessedMessage {
    pub message_id: String,
    pub match_id: i32,
    pub rating_updates: usize,
    pub skipped_updates: usize,
    pub processed_at: DateTime<Utc>
}

/// Message sent after a whole log replay.
#[derive(Debug, Serialize, Deserialize)]
pub struct LogReplayedMessage {
    pub message_id: String,
    pub matches_processed: usize,
    pub tournament_ids: Vec<i32>,
    pub processed_at: DateTime<Utc>
}

/// RabbitMQ publisher for processed-match events. The engine never owns
/// one of these: the caller decides when to announce and failures here
/// never affect a recorded match.
pub struct RabbitMqPublisher {
    connection: Option<Arc<Connection>>,
    channel: Option<Channel>,
    exchange: String,
    routing_key: String
}

impl RabbitMqPublisher {
    pub fn new(exchange: String, routing_key: String) -> Self {
        Self {
            connection: None,
            channel: None,
            exchange,
            routing_key
        }
    }

    pub fn from_config(config: &RabbitMqConfig) -> Self {
        Self::new(config.exchange.clone(), config.routing_key.clone())
    }

    /// Creates and connects a publisher from configuration
    pub async fn connect_from_config(config: &RabbitMqConfig) -> Result<Self, PublisherError> {
        let mut publisher = Self::from_config(config);
        publisher.connect(&config.connection_url()).await?;
        Ok(publisher)
    }

    /// Connects to RabbitMQ and declares the fanout exchange
    pub async fn connect(&mut self, rabbitmq_url: &str) -> Result<(), PublisherError> {
        let connection = Connection::connect(rabbitmq_url, ConnectionProperties::default()).await?;
        let connection = Arc::new(connection);

        let channel = connection.create_channel().await?;

        channel
            .exchange_declare(
                &self.exchange,
                ExchangeKind::Fanout,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default()
            )
            .await?;

        self.connection = Some(connection);
        self.channel = Some(channel);

        info!("Connected to RabbitMQ at {}", rabbitmq_url);
        info!(
            "Exchange '{}' declared with routing key '{}'",
            self.exchange, self.routing_key
        );

        Ok(())
    }

    /// Announces a single recorded match.
    pub async fn publish_match_processed(&self, outcome: &RecordOutcome) -> Result<(), PublisherError> {
        let message = MatchProcessedMessage {
            message_id: Uuid::new_v4().to_string(),
            match_id: outcome.match_id,
            rating_updates: outcome.adjustments.len(),
            skipped_updates: outcome.skipped.len(),
            processed_at: Utc::now()
        };
        self.publish(&message, message.message_id.clone()).await?;

        debug!(
            "Published match processed message for match {} to exchange '{}'",
            outcome.match_id, self.exchange
        );
        Ok(())
    }

    /// Announces a finished log replay.
    pub async fn publish_log_replayed(
        &self,
        matches_processed: usize,
        tournament_ids: Vec<i32>
    ) -> Result<(), PublisherError> {
        let message = LogReplayedMessage {
            message_id: Uuid::new_v4().to_string(),
            matches_processed,
            tournament_ids,
            processed_at: Utc::now()
        };
        self.publish(&message, message.message_id.clone()).await?;

        debug!(
            "Published log replayed message ({} matches) to exchange '{}'",
            matches_processed, self.exchange
        );
        Ok(())
    }

    async fn publish<T: Serialize>(&self, message: &T, message_id: String) -> Result<(), PublisherError> {
        let channel = self.channel.as_ref().ok_or(PublisherError::NotInitialized)?;
        let payload = serde_json::to_vec(message)?;

        channel
            .basic_publish(
                &self.exchange,
                &self.routing_key,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_message_id(message_id.into())
                    .with_timestamp(Utc::now().timestamp() as u64)
            )
            .await?;

        Ok(())
    }

    /// Checks if the publisher is connected
    pub fn is_connected(&self) -> bool {
        self.connection.is_some() && self.channel.is_some()
    }

    /// Closes the connection to RabbitMQ
    pub async fn close(&mut self) -> Result<(), PublisherError> {
        if let Some(channel) = self.channel.take() {
            channel.close(200, "Normal shutdown").await?;
        }

        if let Some(connection) = self.connection.take() {
            if let Ok(conn) = Arc::try_unwrap(connection) {
                conn.close(200, "Normal shutdown").await?;
            }
        }

        info!("RabbitMQ connection closed");
        Ok(())
    }
}

impl Drop for RabbitMqPublisher {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("RabbitMQ publisher dropped without proper closure");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconnected_publisher_refuses_to_publish() {
        let publisher = RabbitMqPublisher::new("arena.stats".to_string(), "stats".to_string());
        assert!(!publisher.is_connected());

        let outcome = RecordOutcome {
            match_id: 1,
            adjustments: Vec::new(),
            skipped: Vec::new()
        };
        let result = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(publisher.publish_match_processed(&outcome));
        assert!(matches!(result, Err(PublisherError::NotInitialized)));
    }
}
