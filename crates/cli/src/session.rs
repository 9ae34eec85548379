// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of a dashboard session against a live server.

use crate::color;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use dash_adapters::{
    AlertBus, BusAlertAdapter, Endpoint, HttpDevfileAdapter, HttpWorkspaceApi,
    JsonRpcStatusChannel, ListenerId, LogNavigator, RestClient, TracedDevfileAdapter,
    TracedWorkspaceApi,
};
use dash_core::AlertItem;
use dash_engine::{Dashboard, DashboardDeps};
use parking_lot::Mutex;
use std::collections::HashSet;
use tokio::sync::mpsc;

/// Push events buffered between the socket task and the store.
const EVENT_BUFFER: usize = 256;

pub type LiveDashboard = Dashboard<
    TracedWorkspaceApi<HttpWorkspaceApi>,
    JsonRpcStatusChannel,
    TracedDevfileAdapter<HttpDevfileAdapter>,
    LogNavigator,
    BusAlertAdapter,
>;

/// A connected session. Alerts are echoed to stderr while it lives.
pub struct Session {
    dashboard: LiveDashboard,
    bus: AlertBus,
    printer: ListenerId,
}

impl Session {
    /// Build the session. Nothing is sent until a command makes a request;
    /// the push socket opens on the first subscription.
    pub fn connect(config: &Config) -> Result<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            anyhow!("no server URL configured (set CHEDASH_URL or `url` in the config file)")
        })?;
        let endpoint = Endpoint::new(url)
            .with_context(|| format!("invalid server URL: {url}"))?
            .with_api_context(config.api_context.clone())
            .with_websocket_context(config.websocket_context.clone())
            .with_token(config.token.clone());
        let client = RestClient::new(endpoint.clone())?;

        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let channel = JsonRpcStatusChannel::new(&endpoint, config.reconnect, events_tx)?;

        let bus = AlertBus::new();
        let printer = AlertPrinter::new(color::should_colorize_stderr());
        let listener = bus.subscribe(move |alerts| printer.print(alerts));

        let dashboard = Dashboard::new(
            DashboardDeps {
                api: TracedWorkspaceApi::new(HttpWorkspaceApi::new(client.clone())),
                channel,
                devfiles: TracedDevfileAdapter::new(HttpDevfileAdapter::new(client)),
                navigator: LogNavigator::new(),
                alerts: BusAlertAdapter::new(bus.clone()),
                token: config.token.clone(),
            },
            config.loader.clone(),
            events_rx,
        );
        tracing::info!(url, "session started");

        Ok(Self {
            dashboard,
            bus,
            printer: listener,
        })
    }

    pub fn dashboard(&self) -> &LiveDashboard {
        &self.dashboard
    }

    /// Release every push subscription and stop echoing alerts.
    pub async fn close(self) {
        self.dashboard.shutdown().await;
        self.bus.unsubscribe(self.printer);
        tracing::info!("session closed");
    }
}

/// Prints each alert once, the first time it shows up on the bus.
pub struct AlertPrinter {
    colorize: bool,
    shown: Mutex<HashSet<String>>,
}

impl AlertPrinter {
    pub fn new(colorize: bool) -> Self {
        Self {
            colorize,
            shown: Mutex::new(HashSet::new()),
        }
    }

    /// Lines for alerts not printed yet, oldest first.
    pub fn fresh_lines(&self, alerts: &[AlertItem]) -> Vec<String> {
        let mut shown = self.shown.lock();
        alerts
            .iter()
            .filter(|alert| shown.insert(alert.key.clone()))
            .map(|alert| format_alert(alert, self.colorize))
            .collect()
    }

    fn print(&self, alerts: &[AlertItem]) {
        for line in self.fresh_lines(alerts) {
            eprintln!("{line}");
        }
    }
}

pub fn format_alert(alert: &AlertItem, colorize: bool) -> String {
    let label = color::alert(alert.variant, colorize);
    match &alert.body {
        Some(body) => format!("{label}: {}\n  {body}", alert.title),
        None => format!("{label}: {}", alert.title),
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
