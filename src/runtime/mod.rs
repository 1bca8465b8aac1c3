use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use crate::binding::ConstraintSink;
use crate::breakpoint::{Breakpoint, BreakpointResolver};
use crate::container::{ContainerLayout, ElementPlacement};
use crate::error::{GridError, Result};
use crate::geometry::Size;
use crate::layout::Content;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::LayoutMetrics;
use crate::registry::PlacementRegistry;

/// Configuration knobs for the reflow controller.
#[derive(Clone)]
pub struct ReflowConfig {
    /// Optional structured logger used by the controller.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the embedding application.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for ReflowConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "gridstrap::runtime.metrics".to_string(),
        }
    }
}

impl ReflowConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Handle for a container registered with the controller.
pub type ContainerId = usize;

/// What one resize or reflow call actually did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflowOutcome {
    /// False when the call was a no-op (same width, same class).
    pub reflowed: bool,
    pub class: Breakpoint,
    /// Placements forwarded to the sink (only those that changed).
    pub applied: usize,
}

/// Drives breakpoint observation and layout recomputation for a set of
/// live containers.
///
/// The host forwards every potential geometry change to [`handle_resize`];
/// the controller reclassifies, re-solves each container when something
/// actually changed, and forwards only the placements that differ from the
/// last applied state. The whole pass is one synchronous call chain on the
/// caller's thread.
///
/// [`handle_resize`]: ReflowController::handle_resize
pub struct ReflowController {
    resolver: BreakpointResolver,
    containers: Vec<ContainerLayout>,
    registry: PlacementRegistry,
    config: ReflowConfig,
    started_at: Instant,
    last_metrics_emit: Option<Instant>,
}

impl Default for ReflowController {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflowController {
    pub fn new() -> Self {
        Self::with_config(ReflowConfig::default())
    }

    pub fn with_config(config: ReflowConfig) -> Self {
        Self {
            resolver: BreakpointResolver::new(),
            containers: Vec::new(),
            registry: PlacementRegistry::new(),
            config,
            started_at: Instant::now(),
            last_metrics_emit: None,
        }
    }

    pub fn config_mut(&mut self) -> &mut ReflowConfig {
        &mut self.config
    }

    /// Register a live container. It participates in every reflow until
    /// the controller is dropped.
    pub fn add_container(&mut self, container: ContainerLayout) -> ContainerId {
        self.containers.push(container);
        self.containers.len() - 1
    }

    pub fn container(&self, id: ContainerId) -> Option<&ContainerLayout> {
        self.containers.get(id)
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut ContainerLayout> {
        self.containers.get_mut(id)
    }

    /// The class stored by the most recent observation, if any.
    pub fn current_class(&self) -> Option<Breakpoint> {
        self.resolver.current()
    }

    /// Last placement applied for an element, as the host saw it.
    pub fn applied_placement(&self, id: &str) -> Option<&ElementPlacement> {
        self.registry.placement_of(id)
    }

    /// React to a (potential) geometry change from the host.
    ///
    /// Reclassifies the new width; when neither the class nor the width
    /// moved the call is a no-op and the sink sees nothing, so feeding the
    /// same size twice is safe and cheap. Otherwise every attached
    /// container is re-solved against the new size.
    pub fn handle_resize(
        &mut self,
        size: Size,
        sink: &mut impl ConstraintSink,
    ) -> Result<ReflowOutcome> {
        let width_changed = self.resolver.last_width() != Some(size.width);
        let change = self.resolver.observe(size.width);
        let class = self.resolver.current().ok_or(GridError::Unobserved)?;

        if let Some(change) = change {
            self.log_event(
                LogLevel::Info,
                "breakpoint_changed",
                [
                    json_kv("previous", json!(change.previous)),
                    json_kv("current", json!(change.current)),
                    json_kv("width", json!(size.width)),
                ],
            );
        } else if !width_changed {
            return Ok(ReflowOutcome {
                reflowed: false,
                class,
                applied: 0,
            });
        }

        for container in &mut self.containers {
            if container.is_attached() {
                container.set_superview_size(size)?;
            }
        }

        let applied = self.reflow(sink)?;
        Ok(ReflowOutcome {
            reflowed: true,
            class,
            applied,
        })
    }

    /// Re-solve everything at the current class, preserving each
    /// container's attachment configuration. Call after structural changes
    /// that did not come through the controller's own mutation paths.
    pub fn force_reflow(&mut self, sink: &mut impl ConstraintSink) -> Result<ReflowOutcome> {
        let class = self.resolver.current().ok_or(GridError::Unobserved)?;
        let applied = self.reflow(sink)?;
        Ok(ReflowOutcome {
            reflowed: true,
            class,
            applied,
        })
    }

    /// Find named content in any registered container.
    pub fn get_element_named(&self, name: &str) -> Option<&Content> {
        self.containers
            .iter()
            .find_map(|container| container.get_element_named(name))
    }

    /// Remove named content from whichever container holds it, reflow, and
    /// return the content so the host can detach the underlying element.
    /// The name registry, the placement registry, and the sink are updated
    /// in the same pass; a miss changes nothing and returns `None`.
    pub fn remove_element_named(
        &mut self,
        name: &str,
        sink: &mut impl ConstraintSink,
    ) -> Result<Option<Content>> {
        let removed = self
            .containers
            .iter_mut()
            .find_map(|container| container.remove_element_named(name));
        let Some(content) = removed else {
            return Ok(None);
        };

        self.log_event(
            LogLevel::Info,
            "element_removed",
            [json_kv("name", json!(name))],
        );
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_removal();
            }
        }

        self.force_reflow(sink)?;
        Ok(Some(content))
    }

    /// Feed a sequence of sizes through the controller, as a host rotating
    /// or resizing would. Used by tests and benches.
    pub fn run_scripted<I>(&mut self, sizes: I, sink: &mut impl ConstraintSink) -> Result<()>
    where
        I: IntoIterator<Item = Size>,
    {
        for size in sizes {
            self.handle_resize(size, sink)?;
        }
        Ok(())
    }

    fn reflow(&mut self, sink: &mut impl ConstraintSink) -> Result<usize> {
        let class = self.resolver.current().ok_or(GridError::Unobserved)?;

        let mut placements = Vec::new();
        let mut rows = 0usize;
        let mut hidden = 0usize;
        let mut skipped = Vec::new();

        for (index, container) in self.containers.iter_mut().enumerate() {
            match container.solve(class) {
                Ok(frame) => {
                    rows += frame.rows.len();
                    hidden += frame
                        .rows
                        .iter()
                        .map(|row| row.resolution.hidden)
                        .sum::<usize>();
                    placements.extend(frame.placements);
                }
                // One malformed container must not take down the rest of
                // the screen.
                Err(err) => skipped.push((index, err.to_string())),
            }
        }

        for (index, error) in &skipped {
            self.log_event(
                LogLevel::Warn,
                "container_skipped",
                [
                    json_kv("container", json!(index)),
                    json_kv("error", json!(error)),
                ],
            );
        }

        self.registry.sync(&placements)?;
        let dirty = self.registry.take_dirty();
        sink.apply(&dirty)?;

        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                guard.record_reflow(rows, hidden);
                guard.record_applied(dirty.len());
            }
        }
        self.log_event(
            LogLevel::Debug,
            "reflow_completed",
            [
                json_kv("class", json!(class)),
                json_kv("containers", json!(self.containers.len())),
                json_kv("skipped", json!(skipped.len())),
                json_kv("placements", json!(placements.len())),
                json_kv("applied", json!(dirty.len())),
            ],
        );
        self.maybe_emit_metrics();

        Ok(dirty.len())
    }

    fn log_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, "gridstrap::runtime", message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval.is_zero() {
            return;
        }

        let now = Instant::now();
        if let Some(last) = self.last_metrics_emit {
            if now.duration_since(last) < self.config.metrics_interval {
                return;
            }
        }
        self.last_metrics_emit = Some(now);

        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let uptime = now.duration_since(self.started_at);
                let event = guard
                    .snapshot(uptime)
                    .to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }
}
