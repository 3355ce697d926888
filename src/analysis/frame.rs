//! Ethernet frame and overhead accounting.

/// Preamble plus start-of-frame delimiter, 8 octets on the wire.
pub const PREAMBLE_BITS: u64 = 8 * 8;

/// Minimum inter-packet gap, 12 octets.
pub const INTER_PACKET_GAP_BITS: u64 = 12 * 8;

/// Wire occupancy of a maximum-size best-effort frame: a 1522-octet frame
/// plus preamble and inter-packet gap. Used whenever an interfering class
/// has no registered stream, since a best-effort frame of this size could
/// still occupy the link.
pub const MAX_BE_FRAME_BITS: u64 = 1522 * 8 + PREAMBLE_BITS + INTER_PACKET_GAP_BITS;

/// Policy knobs for bound evaluation.
#[derive(Debug, Clone)]
pub struct BoundPolicy {
    /// Wire occupancy assumed for unregistered interfering traffic.
    pub max_be_frame_bits: u64,
}

impl Default for BoundPolicy {
    fn default() -> Self {
        Self {
            max_be_frame_bits: MAX_BE_FRAME_BITS,
        }
    }
}
