use std::sync::Arc;

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithms::Algorithm;
use crate::generate::generate_random_graph;
use crate::graph::Graph;
use crate::playback::Playback;
use crate::settings::Settings;
use crate::traversal::{Outcome, Snapshot, Traversal};
use crate::worklist::Worklist;

#[cfg(feature = "events")]
use crate::events::{Event, EventSink, PayloadGraph, PayloadStep, Sender};

/// Current graph, the traversal bound to it and the auto-run handle.
///
/// The graph is only ever replaced together with dropping the traversal, and every
/// action that invalidates the traversal cancels playback first, so a pending tick
/// can never step a discarded state.
#[derive(Debug)]
pub struct Session {
    graph: Arc<Graph>,
    algorithm: Algorithm,
    traversal: Option<Traversal>,
    playback: Playback,
    settings: Settings,
    rng: StdRng,

    #[cfg(feature = "events")]
    events: Option<EventSink>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Session with deterministic graph generation.
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        let algorithm = Algorithm::default();
        let playback = Playback::new(settings.playback.interval);
        let mut session = Self {
            graph: Arc::new(Graph::assemble(Vec::new(), Vec::new(), false)),
            algorithm,
            traversal: None,
            playback,
            settings,
            rng,

            #[cfg(feature = "events")]
            events: None,
        };
        let g = session.generate();
        session.replace_graph(g);

        session
    }

    /// Publishes session events to `sender`.
    #[cfg(feature = "events")]
    pub fn set_event_publisher(&mut self, sender: Sender<Event>) {
        self.events = Some(EventSink::new(sender));
    }

    #[cfg(feature = "events")]
    fn publish(&mut self, e: Event) {
        if let Some(sink) = self.events.as_mut() {
            sink.publish(e);
        }
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn traversal(&self) -> Option<&Traversal> {
        self.traversal.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Graph settings apply on the next generation, the playback interval immediately.
    pub fn update_settings(&mut self, settings: Settings) {
        self.playback.set_interval(settings.playback.interval);
        self.settings = settings;
    }

    /// Generates a new graph for the current algorithm, discarding the traversal.
    pub fn regenerate(&mut self) {
        self.stop();
        let g = self.generate();
        self.replace_graph(g);
    }

    /// Replaces the graph with a caller supplied one, discarding the traversal.
    pub fn set_graph(&mut self, g: Graph) {
        self.stop();
        self.replace_graph(g);
    }

    /// Switches algorithm and generates a graph matching its density and weights.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.stop();
        log::info!("switching algorithm {} -> {algorithm}", self.algorithm);
        self.algorithm = algorithm;

        #[cfg(feature = "events")]
        self.publish(Event::AlgorithmChanged(algorithm));

        let g = self.generate();
        self.replace_graph(g);
    }

    /// (Re)starts the selected algorithm on the current graph.
    pub fn start(&mut self) {
        self.stop();
        self.begin();
    }

    /// Advances the traversal by one step.
    ///
    /// Without a traversal bound to the current graph this starts one instead and
    /// reports [`Outcome::Restarted`].
    pub fn step(&mut self) -> Outcome {
        let graph = &self.graph;
        let outcome = match self.traversal.as_mut().filter(|t| t.is_bound_to(graph)) {
            Some(t) => t.step(),
            None => {
                log::warn!(
                    "no {} traversal bound to the current graph, starting one",
                    self.algorithm
                );
                self.begin();
                Outcome::Restarted
            }
        };

        #[cfg(feature = "events")]
        if let Some(t) = self.traversal.as_ref() {
            let payload = PayloadStep {
                algorithm: t.algorithm(),
                outcome,
                message: t.message().to_string(),
                finished: t.is_finished(),
            };
            self.publish(Event::Stepped(payload));
        }

        outcome
    }

    /// Cancels playback and drops the traversal. The graph stays.
    pub fn reset(&mut self) {
        self.stop();
        self.traversal = None;

        #[cfg(feature = "events")]
        self.publish(Event::Reset);
    }

    /// Starts auto-run. The first step happens one interval after `now`.
    /// A missing, stale or finished traversal is restarted first.
    pub fn run(&mut self, now: Instant) {
        let needs_start = self
            .traversal
            .as_ref()
            .is_none_or(|t| !t.is_bound_to(&self.graph) || t.is_finished());
        if needs_start {
            self.begin();
        }
        self.playback.start(now);
        log::debug!("playback started every {:?}", self.playback.interval());

        #[cfg(feature = "events")]
        self.publish(Event::PlaybackStarted);
    }

    /// Cancels auto-run. Returns whether it was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.playback.cancel();
        if was_running {
            log::debug!("playback stopped");

            #[cfg(feature = "events")]
            self.publish(Event::PlaybackStopped);
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.playback.is_running()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Drives auto-run from the host's tick loop. Performs at most one step and stops
    /// playback once the traversal finishes.
    pub fn tick(&mut self, now: Instant) -> Option<Outcome> {
        if !self.playback.poll(now) {
            return None;
        }

        let outcome = self.step();
        if self.traversal.as_ref().is_none_or(Traversal::is_finished) {
            self.stop();
        }
        Some(outcome)
    }

    pub fn worklist(&self) -> Option<Worklist> {
        self.traversal.as_ref().map(Traversal::worklist)
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.traversal.as_ref().map(Traversal::snapshot)
    }

    /// Status line for the UI.
    pub fn message(&self) -> String {
        match &self.traversal {
            Some(t) => t.message().to_string(),
            None => format!("Press step to start {}", self.algorithm.info().label),
        }
    }

    fn begin(&mut self) {
        self.traversal = Some(Traversal::start(self.algorithm, Arc::clone(&self.graph)));

        #[cfg(feature = "events")]
        self.publish(Event::TraversalStarted(self.algorithm));
    }

    fn generate(&mut self) -> Graph {
        let info = self.algorithm.info();
        let s = &self.settings.graph;
        let edge_chance = s.edge_chance.unwrap_or(info.default_edge_chance);
        let weighted = s.weighted || info.forces_weights;

        generate_random_graph(&mut self.rng, s.clamped_node_count(), edge_chance, weighted)
    }

    /// The only place the graph changes; the traversal goes with it.
    fn replace_graph(&mut self, g: Graph) {
        self.traversal = None;
        self.graph = Arc::new(g);

        #[cfg(feature = "events")]
        {
            let payload = PayloadGraph {
                nodes: self.graph.node_count(),
                edges: self.graph.edge_count(),
                weighted: self.graph.is_weighted(),
            };
            self.publish(Event::GraphGenerated(payload));
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
