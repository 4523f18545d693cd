//! HUD text
//!
//! Plain strings for an overlay; drawing them is up to the frontend.

use crate::settings::Tunables;
use crate::sim::{AvoidanceState, FrameResult, RangeBand};

/// Status lines for one frame, top to bottom
pub fn status_lines(frame: &FrameResult, tunables: &Tunables) -> Vec<String> {
    let pos = frame.pose.position;
    let mut lines = vec![
        format!("Position: ({}, {})", pos.x as i32, pos.y as i32),
        format!("Heading: {}°", frame.pose.heading_deg as i32 % 360),
        format!("Speed: {:.1} px/frame (W/S)", tunables.speed),
        format!("Turn rate: {:.1}°/frame (A/D)", tunables.turn_rate),
        format!(
            "Avoidance threshold: {}px (Q/E)",
            tunables.avoidance_threshold as i32
        ),
        format!(
            "Sectors: front {:.0} | left {:.0} | right {:.0}",
            frame.sectors.front, frame.sectors.left, frame.sectors.right
        ),
    ];

    if let AvoidanceState::Turning {
        direction,
        frames_remaining,
    } = frame.avoidance
    {
        lines.push(format!(
            "Avoiding: turning {} ({} frames left)",
            direction.as_str(),
            frames_remaining
        ));
    }

    lines
}

/// Count of rays per proximity band: (danger, caution, clear)
pub fn band_counts(frame: &FrameResult, threshold: f32) -> (usize, usize, usize) {
    frame
        .readings
        .iter()
        .fold((0, 0, 0), |(danger, caution, clear), r| {
            match r.proximity(threshold) {
                RangeBand::Danger => (danger + 1, caution, clear),
                RangeBand::Caution => (danger, caution + 1, clear),
                RangeBand::Clear => (danger, caution, clear + 1),
            }
        })
}
