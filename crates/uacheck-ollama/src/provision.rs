//! Model provisioning

use futures::StreamExt;

use crate::progress::{ProgressTracker, ProgressUpdate};
use crate::{Error, OllamaClient, Result};

/// What a finished pull reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullSummary {
    pub records: usize,
    pub last_status: Option<String>,
}

/// Pull `model` so it is available for generation, reporting download
/// progress through `on_progress`.
///
/// Pulling a model that is already present is cheap, so this is safe to
/// call on every start. The pull succeeds when the server closes the
/// stream; an `error` record or any read failure aborts it.
pub async fn ensure_model<F>(
    client: &OllamaClient,
    model: &str,
    mut on_progress: F,
) -> Result<PullSummary>
where
    F: FnMut(&ProgressUpdate),
{
    let mut stream = client.pull(model).await?;
    let mut tracker = ProgressTracker::new();
    let mut records = 0;

    while let Some(record) = stream.next().await {
        let record = record?;
        records += 1;

        if let Some(error) = record.error {
            return Err(Error::Pull(error));
        }

        if let Some(update) = tracker.observe(&record) {
            on_progress(&update);
        }
    }

    let summary = PullSummary {
        records,
        last_status: tracker.last_status().map(str::to_string),
    };
    tracing::info!(
        "Pull of {} finished after {} record(s), last status: {:?}",
        model,
        summary.records,
        summary.last_status
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_ensure_model_reports_progress() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/pull")
            .with_status(200)
            .with_body(concat!(
                "{\"status\":\"pulling manifest\"}\n",
                "{\"status\":\"downloading\",\"digest\":\"sha1\",\"completed\":1048576,\"total\":2097152}\n",
                "{\"status\":\"downloading\",\"digest\":\"sha1\",\"completed\":2097152,\"total\":2097152}\n",
                "{\"status\":\"downloading\",\"digest\":\"sha2\",\"completed\":0,\"total\":1048576}\n",
                "{\"status\":\"success\"}\n"
            ))
            .create_async()
            .await;

        let client = OllamaClient::new(server.url()).unwrap();
        let mut updates = Vec::new();
        let summary = ensure_model(&client, "mistral", |update| updates.push(update.clone()))
            .await
            .unwrap();

        assert_eq!(summary.records, 5);
        assert_eq!(summary.last_status.as_deref(), Some("success"));

        let lines: Vec<_> = updates.iter().map(|u| (u.new_line, u.percentage)).collect();
        assert_eq!(lines, [(true, 50.0), (false, 100.0), (true, 0.0)]);
    }

    #[tokio::test]
    async fn test_ensure_model_without_done_record() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/pull")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let client = OllamaClient::new(server.url()).unwrap();
        let summary = ensure_model(&client, "mistral", |_| {}).await.unwrap();
        assert_eq!(summary, PullSummary::default());
    }

    #[tokio::test]
    async fn test_error_record_fails_pull() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/pull")
            .with_status(200)
            .with_body("{\"error\":\"pull model manifest: file does not exist\"}\n")
            .create_async()
            .await;

        let client = OllamaClient::new(server.url()).unwrap();
        let err = ensure_model(&client, "nope", |_| {}).await.unwrap_err();
        assert!(matches!(err, Error::Pull(ref msg) if msg.contains("does not exist")));
    }

    #[tokio::test]
    async fn test_error_status_fails_pull() {
        let mut server = Server::new_async().await;
        for (status, body) in [
            (500, r#"{"error":"out of disk space"}"#),
            (404, r#"{"error":"model not found"}"#),
        ] {
            let mock = server
                .mock("POST", "/api/pull")
                .with_status(status)
                .with_body(body)
                .create_async()
                .await;

            let client = OllamaClient::new(server.url()).unwrap();
            let mut updates = 0;
            let err = ensure_model(&client, "mistral", |_| updates += 1)
                .await
                .unwrap_err();

            assert!(
                matches!(err, Error::Status { status: s, ref body } if s == status as u16 && body.contains("error")),
                "status {} gave {:?}",
                status,
                err
            );
            assert_eq!(updates, 0);

            mock.remove_async().await;
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails_pull() {
        let client = OllamaClient::new("http://127.0.0.1:9").unwrap();
        let err = ensure_model(&client, "mistral", |_| {}).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
