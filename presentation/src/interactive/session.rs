//! Line-oriented interactive lookups
//!
//! Every valid id read starts a new lookup immediately; the previous one, if
//! still running, is superseded and stops rendering. A line that fails
//! validation is rejected and leaves the running lookup alone.

use colored::Colorize;
use lookup_application::{LookupCompanyUseCase, LookupSummary, RenderSink};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Interactive lookup session
pub struct InteractiveSession {
    lookup: Arc<LookupCompanyUseCase>,
    sink: Arc<dyn RenderSink>,
    show_prompt: bool,
}

impl InteractiveSession {
    pub fn new(lookup: Arc<LookupCompanyUseCase>, sink: Arc<dyn RenderSink>) -> Self {
        Self {
            lookup,
            sink,
            show_prompt: true,
        }
    }

    /// Set whether to print the welcome banner and help
    pub fn with_prompt(mut self, show: bool) -> Self {
        self.show_prompt = show;
        self
    }

    /// Read ids from stdin until EOF or `/quit`
    pub async fn run(&self) -> Vec<LookupSummary> {
        self.run_with(BufReader::new(tokio::io::stdin())).await
    }

    /// Read ids from `reader` until EOF or `/quit`.
    ///
    /// Returns the summary of every submitted lookup, in submission order.
    pub async fn run_with<R>(&self, reader: R) -> Vec<LookupSummary>
    where
        R: AsyncBufRead + Unpin,
    {
        if self.show_prompt {
            self.print_welcome();
        }

        let mut lines = reader.lines();
        let mut in_flight = InFlight::default();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(line) {
                    break;
                }
                continue;
            }

            in_flight.reap().await;
            debug!("Submitting {:?} ({} still running)", line, in_flight.running());
            in_flight.push(self.submit(line.to_string()));
        }

        in_flight.finish().await
    }

    fn submit(&self, input: String) -> JoinHandle<LookupSummary> {
        let lookup = Arc::clone(&self.lookup);
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move { lookup.execute(&input, sink.as_ref()).await })
    }

    /// Returns `true` when the session should end
    fn handle_command(&self, line: &str) -> bool {
        match line {
            "/quit" | "/exit" | "/q" => true,
            "/help" | "/h" => {
                self.print_help();
                false
            }
            other => {
                println!("{} {}", "Unknown command:".red(), other);
                false
            }
        }
    }

    fn print_welcome(&self) {
        println!("{}", "CNPJ lookup - interactive mode".cyan().bold());
        self.print_help();
    }

    fn print_help(&self) {
        println!("Type a CNPJ (with or without punctuation) and press Enter.");
        println!("A new valid id replaces the lookup in progress.");
        println!("Commands: /help, /quit");
    }
}

/// Spawned lookups, collected as soon as they finish
struct InFlight<T> {
    submitted: usize,
    running: Vec<(usize, JoinHandle<T>)>,
    finished: Vec<(usize, T)>,
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            submitted: 0,
            running: Vec::new(),
            finished: Vec::new(),
        }
    }
}

impl<T> InFlight<T> {
    fn push(&mut self, handle: JoinHandle<T>) {
        self.running.push((self.submitted, handle));
        self.submitted += 1;
    }

    fn running(&self) -> usize {
        self.running.len()
    }

    /// Collect every task that has already finished, without waiting.
    async fn reap(&mut self) {
        let (done, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|(_, handle)| handle.is_finished());
        self.running = running;
        for (index, handle) in done {
            self.collect(index, handle).await;
        }
    }

    async fn collect(&mut self, index: usize, handle: JoinHandle<T>) {
        match handle.await {
            Ok(value) => self.finished.push((index, value)),
            Err(e) => warn!("Lookup task failed: {}", e),
        }
    }

    /// Wait for the remaining tasks; results come back in submission order.
    async fn finish(mut self) -> Vec<T> {
        for (index, handle) in std::mem::take(&mut self.running) {
            self.collect(index, handle).await;
        }
        self.finished.sort_by_key(|(index, _)| *index);
        self.finished.into_iter().map(|(_, value)| value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lookup_application::{
        LookupOutcome, QuerySourceUseCase, RenderEvent, SourceError, SourceGateway,
    };
    use lookup_domain::{Cnpj, ProviderId, RetryPolicy, SourceRecord};
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    struct SlowGateway {
        provider: ProviderId,
        delay: Duration,
    }

    #[async_trait]
    impl SourceGateway for SlowGateway {
        fn provider(&self) -> ProviderId {
            self.provider
        }

        async fn fetch(&self, cnpj: &Cnpj) -> Result<SourceRecord, SourceError> {
            tokio::time::sleep(self.delay).await;
            let data = match self.provider {
                ProviderId::Authoritative => {
                    json!({"cnpj_raiz": &cnpj.as_str()[..8], "razao_social": cnpj.as_str()})
                }
                _ => json!({"cnpj": cnpj.as_str(), "status": "OK"}),
            };
            Ok(SourceRecord::new(self.provider, data))
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl RenderSink for CollectingSink {
        fn emit(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn lookup() -> Arc<LookupCompanyUseCase> {
        let sources = vec![QuerySourceUseCase::new(
            Arc::new(SlowGateway {
                provider: ProviderId::Authoritative,
                delay: Duration::from_millis(500),
            }),
            RetryPolicy::no_retry(),
        )];
        Arc::new(LookupCompanyUseCase::new(sources).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_line_starts_a_lookup() {
        let sink = Arc::new(CollectingSink::default());
        let session = InteractiveSession::new(lookup(), sink.clone()).with_prompt(false);

        let input: &[u8] = b"11.222.333/0001-81\n\nnot-a-cnpj\n";
        let summaries = session.run_with(input).await;

        assert_eq!(summaries.len(), 2);
        assert!(matches!(summaries[1].outcome, LookupOutcome::Rejected { .. }));
        // a typo does not supersede the lookup already running
        assert_eq!(
            summaries[0].outcome,
            LookupOutcome::Rendered {
                provider: ProviderId::Authoritative,
                preliminary: false
            }
        );
        let events = sink.events.lock().unwrap();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, RenderEvent::InitialRender { .. }))
        );
        assert!(
            events
                .iter()
                .any(|e| matches!(e, RenderEvent::ValidationRejected { .. }))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_out_lookups_all_render() {
        let sink = Arc::new(CollectingSink::default());
        let session = InteractiveSession::new(lookup(), sink.clone()).with_prompt(false);

        let (mut writer, reader) = tokio::io::duplex(64);
        let typist = tokio::spawn(async move {
            for id in ["11222333000181", "00000000000191", "11.222.333/0001-81"] {
                writer.write_all(format!("{}\n", id).as_bytes()).await.unwrap();
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        });

        let summaries = session.run_with(BufReader::new(reader)).await;
        typist.await.unwrap();

        assert_eq!(summaries.len(), 3);
        assert!(summaries.iter().all(|s| matches!(
            s.outcome,
            LookupOutcome::Rendered { .. }
        )));
        let ids: Vec<_> = summaries
            .iter()
            .map(|s| s.cnpj.as_ref().unwrap().as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["11222333000181", "00000000000191", "11222333000181"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_lookups_are_reaped() {
        let mut in_flight = InFlight::default();
        in_flight.push(tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            99u32
        }));

        for value in 0..10u32 {
            in_flight.push(tokio::spawn(async move { value }));
            tokio::time::sleep(Duration::from_millis(1)).await;
            in_flight.reap().await;
            assert_eq!(in_flight.running(), 1);
        }

        let mut expected = vec![99];
        expected.extend(0..10);
        assert_eq!(in_flight.finish().await, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_stops_reading() {
        let sink = Arc::new(CollectingSink::default());
        let session = InteractiveSession::new(lookup(), sink.clone()).with_prompt(false);

        let input: &[u8] = b"/quit\n11222333000181\n";
        let summaries = session.run_with(input).await;

        assert!(summaries.is_empty());
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_line_renders() {
        let sink = Arc::new(CollectingSink::default());
        let session = InteractiveSession::new(lookup(), sink.clone()).with_prompt(false);

        let input: &[u8] = b"11222333000181\n";
        let summaries = session.run_with(input).await;

        assert_eq!(summaries.len(), 1);
        assert!(matches!(
            summaries[0].outcome,
            LookupOutcome::Rendered {
                provider: ProviderId::Authoritative,
                preliminary: false
            }
        ));
        assert_eq!(sink.events.lock().unwrap().len(), 1);
    }
}
