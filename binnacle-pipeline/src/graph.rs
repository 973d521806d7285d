// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The static sensor graph and its tick loop.
//!
//! Nodes live in arena-style vectors addressed by typed ids and are
//! populated once at startup by [`PipelineBuilder`]; edges are id lists on
//! the source nodes. After [`PipelineBuilder::build`] the graph shape is
//! immutable (there is no unregistration and no dynamic rewiring), so the
//! tick loop needs no synchronization for the edge structure.
//!
//! # Delivery semantics
//!
//! [`Pipeline::tick`] samples every due producer (in scheduler registration
//! order) and pushes each reading through the attached transforms and sinks
//! synchronously, within the same tick, via a reused scratch queue. For a
//! single producer, sinks observe every emitted value in emission order;
//! across producers no relative ordering is promised. The scratch queue is
//! working storage inside one tick, not a buffer between ticks, and the hot
//! path performs no allocation once the queue has grown to the graph's
//! fan-out depth.

use crate::producer::{ProducerKind, ProducerNode};
use crate::scheduler::Scheduler;
use crate::sink::{AcceptReading, SinkNode};
use crate::transform::{TransformKind, TransformNode};
use binnacle_core::{Millis, Reading, Signal};
use std::collections::VecDeque;
use tracing::warn;

/// Handle to a producer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProducerId(usize);

/// Handle to a transform node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformId(usize);

/// Handle to a sink node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(usize);

/// An edge target: where a reading is delivered next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    Transform(TransformId),
    Sink(SinkId),
}

impl From<TransformId> for Port {
    fn from(id: TransformId) -> Self {
        Self::Transform(id)
    }
}

impl From<SinkId> for Port {
    fn from(id: SinkId) -> Self {
        Self::Sink(id)
    }
}

/// An edge source: a node with an output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Producer(ProducerId),
    Transform(TransformId),
}

impl From<ProducerId> for Output {
    fn from(id: ProducerId) -> Self {
        Self::Producer(id)
    }
}

impl From<TransformId> for Output {
    fn from(id: TransformId) -> Self {
        Self::Transform(id)
    }
}

/// Rejected graph shapes, reported by [`PipelineBuilder::build`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A producer was registered with a zero sampling period.
    #[error("producer `{signal}` has a zero sampling period")]
    ZeroPeriod { signal: Signal },

    /// A node carries an empty signal path.
    #[error("{node} has an empty signal path")]
    EmptySignal { node: String },

    /// An edge references a node that is not part of this graph.
    #[error("edge from {from} references a node outside the graph")]
    DanglingEdge { from: String },

    /// Transform-to-transform edges form a cycle; a reading entering the
    /// cycle would circulate forever within one tick.
    #[error("transform graph contains a cycle")]
    TransformCycle,
}

/// Builds the immutable sensor graph.
///
/// Ids returned by the `producer`/`transform`/`sink` methods are only
/// meaningful for the builder that issued them.
#[derive(Default)]
pub struct PipelineBuilder {
    producers: Vec<ProducerNode>,
    periods: Vec<Millis>,
    transforms: Vec<TransformNode>,
    sinks: Vec<SinkNode>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a producer sampled every `period_ms`.
    pub fn producer(&mut self, kind: ProducerKind, signal: Signal, period_ms: Millis) -> ProducerId {
        self.producers.push(ProducerNode::new(kind, signal));
        self.periods.push(period_ms);
        ProducerId(self.producers.len() - 1)
    }

    /// Register a transform. `signal` re-tags the output identity; `None`
    /// passes the input signal through.
    pub fn transform(&mut self, kind: TransformKind, signal: Option<Signal>) -> TransformId {
        self.transforms.push(TransformNode::new(kind, signal));
        TransformId(self.transforms.len() - 1)
    }

    /// Register a sink.
    pub fn sink(&mut self, sink: impl Into<SinkNode>) -> SinkId {
        self.sinks.push(sink.into());
        SinkId(self.sinks.len() - 1)
    }

    /// Add a directed edge. Fan-out is explicit: call once per target, in
    /// the order deliveries should happen within a tick.
    pub fn connect(&mut self, from: impl Into<Output>, to: impl Into<Port>) {
        let port = to.into();
        match from.into() {
            Output::Producer(ProducerId(i)) => self.producers[i].outputs.push(port),
            Output::Transform(TransformId(i)) => self.transforms[i].outputs.push(port),
        }
    }

    /// Validate the graph and freeze it into a [`Pipeline`].
    pub fn build(self) -> Result<Pipeline, BuildError> {
        for (node, &period) in self.producers.iter().zip(&self.periods) {
            if node.signal.is_empty() {
                return Err(BuildError::EmptySignal {
                    node: "producer".into(),
                });
            }
            if period == 0 {
                return Err(BuildError::ZeroPeriod {
                    signal: node.signal.clone(),
                });
            }
        }
        for node in &self.transforms {
            if node.signal.as_ref().is_some_and(Signal::is_empty) {
                return Err(BuildError::EmptySignal {
                    node: "transform".into(),
                });
            }
        }
        self.check_edges()?;
        self.check_transform_cycles()?;

        let mut scheduler = Scheduler::new();
        for (index, &period) in self.periods.iter().enumerate() {
            scheduler.on_repeat(period, ProducerId(index));
        }

        let fanout: usize = self
            .producers
            .iter()
            .map(|node| node.outputs.len())
            .chain(self.transforms.iter().map(|node| node.outputs.len()))
            .sum();

        Ok(Pipeline {
            producers: self.producers,
            transforms: self.transforms,
            sinks: self.sinks,
            scheduler,
            due: Vec::with_capacity(self.periods.len()),
            queue: VecDeque::with_capacity(fanout.max(1)),
        })
    }

    fn check_edges(&self) -> Result<(), BuildError> {
        let port_ok = |port: &Port| match *port {
            Port::Transform(TransformId(i)) => i < self.transforms.len(),
            Port::Sink(SinkId(i)) => i < self.sinks.len(),
        };
        for node in &self.producers {
            if !node.outputs.iter().all(port_ok) {
                return Err(BuildError::DanglingEdge {
                    from: format!("producer `{}`", node.signal),
                });
            }
        }
        for (index, node) in self.transforms.iter().enumerate() {
            if !node.outputs.iter().all(port_ok) {
                return Err(BuildError::DanglingEdge {
                    from: format!("transform {index}"),
                });
            }
        }
        Ok(())
    }

    fn check_transform_cycles(&self) -> Result<(), BuildError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            InStack,
            Done,
        }

        fn visit(
            index: usize,
            transforms: &[TransformNode],
            marks: &mut [Mark],
        ) -> Result<(), BuildError> {
            marks[index] = Mark::InStack;
            for port in &transforms[index].outputs {
                if let Port::Transform(TransformId(next)) = *port {
                    match marks[next] {
                        Mark::InStack => return Err(BuildError::TransformCycle),
                        Mark::New => visit(next, transforms, marks)?,
                        Mark::Done => {}
                    }
                }
            }
            marks[index] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::New; self.transforms.len()];
        for index in 0..self.transforms.len() {
            if marks[index] == Mark::New {
                visit(index, &self.transforms, &mut marks)?;
            }
        }
        Ok(())
    }
}

/// The frozen sensor graph plus its scheduler.
pub struct Pipeline {
    producers: Vec<ProducerNode>,
    transforms: Vec<TransformNode>,
    sinks: Vec<SinkNode>,
    scheduler: Scheduler<ProducerId>,
    due: Vec<ProducerId>,
    queue: VecDeque<(Reading, Port)>,
}

impl Pipeline {
    /// Advance logical time: sample every due producer and run its fan-out
    /// to completion.
    ///
    /// A failed sample skips propagation for this tick and keeps the
    /// producer's last reading; it never stops the loop.
    pub fn tick(&mut self, now: Millis) {
        let mut due = std::mem::take(&mut self.due);
        self.scheduler.poll(now, &mut due);
        for &id in &due {
            self.sample_one(id, now);
            self.drain();
        }
        self.due = due;
    }

    /// Last successfully produced reading of a producer, for late
    /// subscribers and diagnostics.
    pub fn last_reading(&self, ProducerId(index): ProducerId) -> Option<&Reading> {
        self.producers[index].last.as_ref()
    }

    /// Number of registered producers.
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    fn sample_one(&mut self, ProducerId(index): ProducerId, now: Millis) {
        let Self {
            producers, queue, ..
        } = self;
        let node = &mut producers[index];
        match node.sample(now) {
            Ok(reading) => {
                for &port in &node.outputs {
                    queue.push_back((reading.clone(), port));
                }
                node.last = Some(reading);
            }
            Err(error) => {
                warn!(signal = %node.signal, %error, "sensor read failed, keeping last value");
            }
        }
    }

    fn drain(&mut self) {
        while let Some((reading, port)) = self.queue.pop_front() {
            match port {
                Port::Transform(TransformId(index)) => {
                    let Self {
                        transforms, queue, ..
                    } = self;
                    let node = &mut transforms[index];
                    match node.kind.apply(&reading) {
                        Ok(Some(value)) => {
                            let signal = node
                                .signal
                                .clone()
                                .unwrap_or_else(|| reading.signal.clone());
                            let out = reading.derive(signal, value);
                            for &next in &node.outputs {
                                queue.push_back((out.clone(), next));
                            }
                        }
                        Ok(None) => {}
                        Err(anomaly) => {
                            warn!(signal = %reading.signal, %anomaly, "suppressing rate output");
                        }
                    }
                }
                Port::Sink(SinkId(index)) => self.sinks[index].accept(&reading),
            }
        }
    }
}
