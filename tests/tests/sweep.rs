mod utils;
#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;

    use loadsweep::{sweep, LoadParameter, StepRange};
    use std::time::Duration;

    #[tokio::test]
    async fn closed_loop_sweep_against_mock_service() {
        init().await;

        let results = sweep(&format!("http://{MOCK_ADDR}/delay/ms/5"))
            .closed_loop(StepRange::new(2, 2, 4), Duration::from_millis(50))
            .duration(Duration::from_secs(2))
            .timeout(Duration::from_secs(1))
            .cooldown(Duration::from_millis(200))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].load, LoadParameter::Users(2));
        assert_eq!(results[1].load, LoadParameter::Users(4));
        for run in &results {
            assert!(run.success_count > 0);
            assert_eq!(run.failure_count, 0);
            let latency = run.latency.expect("successful requests recorded");
            assert!(latency.mean >= Duration::from_millis(5));
            assert!(latency.p95 <= latency.max);
        }
    }

    #[tokio::test]
    async fn open_loop_sweep_counts_server_errors() {
        init().await;

        let results = sweep(&format!("http://{MOCK_ADDR}/error"))
            .open_loop(StepRange::new(20.0, 10.0, 30.0))
            .duration(Duration::from_secs(2))
            .timeout(Duration::from_secs(1))
            .cooldown(Duration::from_millis(200))
            .seed(3)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        for run in &results {
            assert_eq!(run.success_count, 0);
            assert!(run.failure_count > 0);
            assert!(run.latency.is_none());
        }
    }

    #[tokio::test]
    async fn timeouts_are_reported_separately() {
        init().await;

        let results = sweep(&format!("http://{MOCK_ADDR}/delay/ms/1500"))
            .open_loop(StepRange::new(5.0, 1.0, 5.0))
            .duration(Duration::from_secs(2))
            .timeout(Duration::from_millis(200))
            .seed(9)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let run = &results[0];
        assert_eq!(run.success_count, 0);
        assert!(run.timeout_count > 0);
        assert_eq!(run.timeout_count, run.failure_count);
        assert!(run.latency.is_none());
    }
}
