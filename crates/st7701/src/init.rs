//! Vendor init tables

use crate::command::*;

/// One step of an init table
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitOp {
    /// Command byte followed by its parameter bytes
    Command(u8, &'static [u8]),
    /// Pause in milliseconds
    Delay(u16),
}

/// Parameter bytes accepted per command
pub const MAX_PARAMETERS: usize = 16;

const BK_NONE: &[u8] = &[0x77, 0x01, 0x00, 0x00, CMD2_PAGE_NONE];
const BK0: &[u8] = &[0x77, 0x01, 0x00, 0x00, CMD2_PAGE_BK0];
const BK1: &[u8] = &[0x77, 0x01, 0x00, 0x00, CMD2_PAGE_BK1];
const BK3: &[u8] = &[0x77, 0x01, 0x00, 0x00, CMD2_PAGE_BK3];

/// Init table for the 480x480 "type 5" ST7701S glass
///
/// Sleep-out, pixel format and display-on are not part of the table; the
/// driver sends those after it.
pub static TYPE5_INIT_OPERATIONS: &[InitOp] = &[
    InitOp::Command(CMD2_PAGE_SELECT, BK3),
    InitOp::Command(0xEF, &[0x08]),
    InitOp::Command(CMD2_PAGE_SELECT, BK0),
    // Line setting: 480 lines
    InitOp::Command(0xC0, &[0x3B, 0x00]),
    // Porch control
    InitOp::Command(0xC1, &[0x10, 0x0C]),
    // Inversion selection and frame rate
    InitOp::Command(0xC2, &[0x07, 0x0A]),
    InitOp::Command(0xC7, &[0x00]),
    InitOp::Command(0xCC, &[0x10]),
    InitOp::Command(0xCD, &[0x08]),
    // Positive gamma
    InitOp::Command(
        0xB0,
        &[
            0x05, 0x12, 0x98, 0x0E, 0x0F, 0x07, 0x07, 0x09, 0x09, 0x23, 0x05, 0x52, 0x0F, 0x67,
            0x2C, 0x11,
        ],
    ),
    // Negative gamma
    InitOp::Command(
        0xB1,
        &[
            0x0B, 0x11, 0x97, 0x0C, 0x12, 0x06, 0x06, 0x08, 0x08, 0x22, 0x03, 0x51, 0x11, 0x66,
            0x2B, 0x0F,
        ],
    ),
    InitOp::Command(CMD2_PAGE_SELECT, BK1),
    // Vop amplitude
    InitOp::Command(0xB0, &[0x5D]),
    // VCOM amplitude
    InitOp::Command(0xB1, &[0x2D]),
    // VGH voltage
    InitOp::Command(0xB2, &[0x81]),
    InitOp::Command(0xB3, &[0x80]),
    // VGL voltage
    InitOp::Command(0xB5, &[0x4E]),
    InitOp::Command(0xB7, &[0x85]),
    InitOp::Command(0xB8, &[0x20]),
    InitOp::Command(0xC1, &[0x78]),
    InitOp::Command(0xC2, &[0x78]),
    InitOp::Command(0xD0, &[0x88]),
    // GIP sequence
    InitOp::Command(0xE0, &[0x00, 0x00, 0x02]),
    InitOp::Command(
        0xE1,
        &[
            0x06, 0x30, 0x08, 0x30, 0x05, 0x30, 0x07, 0x30, 0x00, 0x33, 0x33,
        ],
    ),
    InitOp::Command(
        0xE2,
        &[
            0x11, 0x11, 0x33, 0x33, 0xF4, 0x00, 0x00, 0x00, 0xF4, 0x00, 0x00, 0x00,
        ],
    ),
    InitOp::Command(0xE3, &[0x00, 0x00, 0x11, 0x11]),
    InitOp::Command(0xE4, &[0x44, 0x44]),
    InitOp::Command(
        0xE5,
        &[
            0x0D, 0xF5, 0x30, 0xF0, 0x0F, 0xF7, 0x30, 0xF0, 0x09, 0xF1, 0x30, 0xF0, 0x0B, 0xF3,
            0x30, 0xF0,
        ],
    ),
    InitOp::Command(0xE6, &[0x00, 0x00, 0x11, 0x11]),
    InitOp::Command(0xE7, &[0x44, 0x44]),
    InitOp::Command(
        0xE8,
        &[
            0x0C, 0xF4, 0x30, 0xF0, 0x0E, 0xF6, 0x30, 0xF0, 0x08, 0xF0, 0x30, 0xF0, 0x0A, 0xF2,
            0x30, 0xF0,
        ],
    ),
    InitOp::Command(0xE9, &[0x36, 0x01]),
    InitOp::Command(0xEB, &[0x00, 0x01, 0xE4, 0xE4, 0x44, 0x88, 0x40]),
    InitOp::Command(
        0xED,
        &[
            0xFF, 0x10, 0xAF, 0x76, 0x54, 0x2B, 0xCF, 0xFF, 0xFF, 0xFC, 0xB2, 0x45, 0x67, 0xFA,
            0x01, 0xFF,
        ],
    ),
    InitOp::Command(0xEF, &[0x08, 0x08, 0x08, 0x45, 0x3F, 0x54]),
    InitOp::Command(CMD2_PAGE_SELECT, BK_NONE),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type5_table_fits_parameter_limit() {
        for op in TYPE5_INIT_OPERATIONS {
            if let InitOp::Command(_, params) = op {
                assert!(params.len() <= MAX_PARAMETERS);
            }
        }
    }

    #[test]
    fn type5_table_returns_to_command1_page() {
        assert_eq!(
            TYPE5_INIT_OPERATIONS.last(),
            Some(&InitOp::Command(CMD2_PAGE_SELECT, BK_NONE))
        );
    }
}
