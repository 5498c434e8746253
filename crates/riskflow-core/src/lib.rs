//! Scenario configuration, tick scheduling, and trial orchestration for the
//! Riskflow simulation.
//!
//! This crate owns the per-tick cycle that drives a run: hazard strike,
//! media start, government broadcast, media feedback, agent activation,
//! and the aggregate snapshot.
//!
//! # Modules
//!
//! - [`analysis`] -- Tie matrix, perception distances, and degree summary.
//! - [`config`] -- Configuration loading from `riskflow-config.yaml` into
//!   strongly-typed structs.
//! - [`recorder`] -- [`TimeSeries`] recording and [`MeanSeries`] averaging.
//! - [`runner`] -- Single and repeated trials with a [`TickCallback`].
//! - [`schedule`] -- Tick counter and scenario event timetable.
//! - [`simulation`] -- The [`Simulation`] scheduler.
//!
//! [`TimeSeries`]: recorder::TimeSeries
//! [`MeanSeries`]: recorder::MeanSeries
//! [`TickCallback`]: runner::TickCallback
//! [`Simulation`]: simulation::Simulation

pub mod analysis;
pub mod config;
pub mod recorder;
pub mod runner;
pub mod schedule;
pub mod simulation;
