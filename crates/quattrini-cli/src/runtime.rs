// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use quattrini_api::Client;
use quattrini_app::{ApiCall, Event};
use quattrini_logs::{LogEntry, LogStore};
use quattrini_tui::AppRuntime;
use std::sync::mpsc::Sender;
use std::thread;

/// Runtime backed by the HTTP client and the shared log store. API calls
/// run on worker threads; completions are posted back through the event
/// channel and applied in arrival order.
pub struct ApiRuntime {
    client: Client,
    logs: LogStore,
}

impl ApiRuntime {
    pub fn new(client: Client, logs: LogStore) -> Self {
        Self { client, logs }
    }
}

impl AppRuntime for ApiRuntime {
    fn dispatch_api(&mut self, token: &str, call: &ApiCall, tx: Sender<Event>) {
        let client = self.client.clone();
        let token = token.to_owned();
        let call = call.clone();
        thread::spawn(move || {
            let outcome = client.execute(&token, &call);
            // The receiver is gone after quit; in-flight results are dropped.
            let _ = tx.send(Event::Api(outcome));
        });
    }

    fn read_logs(&mut self) -> Vec<LogEntry> {
        self.logs.logs()
    }

    fn clear_logs(&mut self) {
        self.logs.clear();
    }
}
