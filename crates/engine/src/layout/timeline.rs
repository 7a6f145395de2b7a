//! Timeline layout
//!
//! Three presentations share one year scale: the compact overview widget, the
//! horizontal multi-lane chart, and the vertical axis/grid views. All of them
//! order events by parsed start year with ties kept in insertion order.

use worldloom_domain::{TimelineEvent, TimelineTrack, TrackId, World};

pub const PX_PER_YEAR: f64 = 10.0;
pub const MIN_EVENT_WIDTH_PX: f64 = 20.0;
pub const CHART_GUTTER_PX: f64 = 20.0;
pub const CHART_PAD_YEARS: i64 = 10;
pub const CHART_MIN_SPAN_YEARS: i64 = 50;
pub const OVERVIEW_MIN_SPAN_YEARS: i64 = 10;

/// Inclusive year range backing a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearExtent {
    pub min: i64,
    pub max: i64,
}

impl YearExtent {
    pub fn span(&self) -> i64 {
        self.max - self.min
    }

    fn with_min_span(mut self, min_span: i64) -> Self {
        if self.span() < min_span {
            self.max = self.min + min_span;
        }
        self
    }
}

fn raw_extent(events: &[TimelineEvent]) -> Option<YearExtent> {
    let mut years = events.iter().flat_map(|e| [e.start(), e.end()]);
    let first = years.next()?;
    let (min, max) = years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    Some(YearExtent { min, max })
}

/// Scale for the dashboard overview widget.
pub fn overview_extent(events: &[TimelineEvent]) -> YearExtent {
    raw_extent(events)
        .unwrap_or(YearExtent { min: 0, max: 0 })
        .with_min_span(OVERVIEW_MIN_SPAN_YEARS)
}

/// Scale for the full chart: padded a decade on both sides, never narrower
/// than fifty years so sparse timelines still read as a band.
pub fn chart_extent(events: &[TimelineEvent]) -> YearExtent {
    let raw = raw_extent(events).unwrap_or(YearExtent { min: 0, max: 0 });
    YearExtent {
        min: raw.min - CHART_PAD_YEARS,
        max: raw.max + CHART_PAD_YEARS,
    }
    .with_min_span(CHART_MIN_SPAN_YEARS)
}

/// Pixel geometry of the chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMetrics {
    pub extent: YearExtent,
    pub width_px: f64,
}

pub fn chart_metrics(events: &[TimelineEvent]) -> ChartMetrics {
    let extent = chart_extent(events);
    ChartMetrics {
        extent,
        width_px: CHART_GUTTER_PX + extent.span() as f64 * PX_PER_YEAR,
    }
}

impl ChartMetrics {
    pub fn x_of_year(&self, year: i64) -> f64 {
        CHART_GUTTER_PX + (year - self.extent.min) as f64 * PX_PER_YEAR
    }
}

/// Visual alternation so adjacent bands stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStyle {
    Plain,
    Hatched,
    Shaded,
}

impl BandStyle {
    fn of_ordinal(ordinal: usize) -> Self {
        match ordinal % 3 {
            0 => Self::Plain,
            1 => Self::Hatched,
            _ => Self::Shaded,
        }
    }
}

/// An event resolved to chart pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent<'a> {
    pub event: &'a TimelineEvent,
    pub x: f64,
    pub width: f64,
    pub band: BandStyle,
}

/// One track's row of positioned events.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane<'a> {
    pub track: &'a TimelineTrack,
    pub events: Vec<PositionedEvent<'a>>,
}

/// Events in display order: stable sort on parsed start year.
pub fn sorted_events(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    let mut sorted: Vec<&TimelineEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start());
    sorted
}

/// Group events into one lane per track. Events without a track, or whose
/// track id no longer resolves, are shown in the first track's lane; the
/// stored reference is never rewritten.
pub fn chart_lanes(world: &World) -> (ChartMetrics, Vec<Lane<'_>>) {
    let metrics = chart_metrics(&world.timeline);
    let track_ids: Vec<TrackId> = world.timeline_tracks.iter().map(|t| t.id).collect();
    let fallback = track_ids.first().copied();

    let mut lanes: Vec<Lane<'_>> = world
        .timeline_tracks
        .iter()
        .map(|track| Lane {
            track,
            events: Vec::new(),
        })
        .collect();

    for (ordinal, event) in sorted_events(&world.timeline).into_iter().enumerate() {
        let effective_track = event
            .track_id
            .filter(|id| track_ids.contains(id))
            .or(fallback);
        let Some(track_id) = effective_track else {
            continue;
        };
        let x = metrics.x_of_year(event.start());
        let width =
            ((event.end() - event.start()) as f64 * PX_PER_YEAR).max(MIN_EVENT_WIDTH_PX);
        if let Some(lane) = lanes.iter_mut().find(|l| l.track.id == track_id) {
            lane.events.push(PositionedEvent {
                event,
                x,
                width,
                band: BandStyle::of_ordinal(ordinal),
            });
        }
    }

    (metrics, lanes)
}

/// Decade gridlines within the chart extent.
pub fn decade_ticks(extent: YearExtent) -> Vec<i64> {
    let first = extent.min.div_euclid(10) * 10;
    let first = if first < extent.min { first + 10 } else { first };
    (0..)
        .map(|i| first + i * 10)
        .take_while(|year| *year <= extent.max)
        .collect()
}

/// Which side of the vertical axis an entry's card sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisEntry<'a> {
    pub event: &'a TimelineEvent,
    pub side: AxisSide,
}

/// Vertical axis view: sorted events alternating sides.
pub fn axis_entries(events: &[TimelineEvent]) -> Vec<AxisEntry<'_>> {
    sorted_events(events)
        .into_iter()
        .enumerate()
        .map(|(index, event)| AxisEntry {
            event,
            side: if index % 2 == 0 {
                AxisSide::Left
            } else {
                AxisSide::Right
            },
        })
        .collect()
}

/// Grid view: just the sorted order, cards handle the rest.
pub fn grid_entries(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    sorted_events(events)
}
