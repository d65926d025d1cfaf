use messages_worker_client::{BulkMessageRequest, Client, MessageRequest, Priority};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::with_defaults()?;

    println!("=== Health Check ===");
    match client.check_health().await {
        Ok(health) => println!("Service is healthy: {}", health.status),
        Err(e) => {
            println!("Health check failed: {}", e);
            return Ok(());
        }
    }

    println!("\n=== Single Message Submission ===");
    let request = MessageRequest::new(
        "pr-123",
        Priority::High,
        "https://httpbin.org/post",
        json!({
            "pull_request": {
                "id": 123,
                "title": "Add new feature",
                "repository": "myorg/myrepo",
                "status": "open"
            }
        }),
    );
    let message = client.post_message(&request).await?;
    println!("Message posted: id={} status={}", message.id, message.status);

    println!("\n=== Bulk Message Submission ===");
    let bulk = BulkMessageRequest {
        messages: vec![
            MessageRequest::new(
                "pr-124",
                Priority::Medium,
                "https://httpbin.org/post",
                json!({ "pull_request": { "id": 124, "title": "Fix bug in authentication" } }),
            ),
            MessageRequest::new(
                "pr-125",
                Priority::Low,
                "https://httpbin.org/post",
                json!({ "pull_request": { "id": 125, "title": "Update documentation" } }),
            ),
        ],
    };
    let response = client.post_bulk_messages(&bulk).await?;
    println!("Bulk posted: {} messages ({})", response.count, response.status);

    println!("\n=== Worker Status ===");
    let status = client.get_worker_status().await?;
    println!("Total workers: {}", status.total_workers);
    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let bucket = status.bucket(priority);
        println!(
            "  {}: {} workers, queue depth {}",
            priority, bucket.count, bucket.queue_depth
        );
    }

    println!("\n=== Scaling ===");
    let added = client.add_workers(Priority::High, 2).await?;
    println!("{}", added.message);

    let removed = client.remove_workers(Priority::High, 1).await?;
    println!("{}", removed.message);

    match client.scale_workers("urgent", 1).await {
        Err(e) if !e.is_api_error() => println!("Rejected locally: {}", e),
        other => println!("Unexpected result: {:?}", other),
    }

    println!("\nHigh priority workers now: {}", client.get_worker_count("high").await?);

    Ok(())
}
