//! Certified literal tables.
//!
//! These are the tables the allocator has shipped with, one per
//! configuration key. They are data, not a bypass: every one of them is run
//! through the validator before a configuration can become active.

use crate::table::config::{AlignmentMode, ConfigKey, PageSize};
use crate::table::descriptor::SizeClassDescriptor;

const fn c(size: u32, pages: u32, batch: u32, cap: u32) -> SizeClassDescriptor {
    SizeClassDescriptor::new(size, pages, batch, cap)
}

/// 4 KiB pages, default new alignment > 8 bytes.
pub static PAGE_4K_ALIGN16: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2906),
    c(16, 1, 32, 2906),
    c(32, 1, 32, 2910),
    c(64, 1, 32, 2906),
    c(80, 1, 32, 2906),
    c(96, 1, 32, 1880),
    c(112, 1, 32, 1490),
    c(128, 1, 32, 1411),
    c(144, 1, 32, 1144),
    c(160, 1, 32, 1037),
    c(176, 1, 32, 525),
    c(192, 1, 32, 563),
    c(208, 1, 32, 380),
    c(224, 1, 32, 512),
    c(240, 1, 32, 316),
    c(256, 1, 32, 553),
    c(272, 1, 32, 267),
    c(288, 1, 32, 301),
    c(304, 1, 32, 261),
    c(336, 1, 32, 457),
    c(368, 1, 32, 226),
    c(400, 1, 32, 207),
    c(448, 1, 32, 241),
    c(512, 1, 32, 673),
    c(576, 2, 32, 333),
    c(640, 2, 32, 206),
    c(768, 2, 32, 329),
    c(896, 2, 32, 290),
    c(1024, 2, 32, 864),
    c(1152, 3, 32, 224),
    c(1280, 3, 32, 184),
    c(1536, 3, 32, 219),
    c(1792, 4, 32, 193),
    c(2048, 4, 32, 483),
    c(2304, 4, 28, 207),
    c(2688, 4, 24, 199),
    c(3200, 4, 20, 187),
    c(3584, 7, 18, 184),
    c(4096, 4, 16, 570),
    c(4736, 5, 13, 226),
    c(5376, 4, 12, 182),
    c(6144, 3, 10, 186),
    c(7168, 7, 9, 190),
    c(8192, 4, 8, 246),
];

/// 8 KiB pages, default new alignment > 8 bytes.
pub static PAGE_8K_ALIGN16: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2369),
    c(16, 1, 32, 2369),
    c(32, 1, 32, 2369),
    c(64, 1, 32, 2369),
    c(80, 1, 32, 2369),
    c(96, 1, 32, 1596),
    c(112, 1, 32, 911),
    c(128, 1, 32, 1035),
    c(144, 1, 32, 699),
    c(160, 1, 32, 586),
    c(176, 1, 32, 333),
    c(192, 1, 32, 418),
    c(208, 1, 32, 296),
    c(224, 1, 32, 264),
    c(240, 1, 32, 251),
    c(256, 1, 32, 507),
    c(272, 1, 32, 231),
    c(288, 1, 32, 264),
    c(304, 1, 32, 205),
    c(320, 1, 32, 250),
    c(336, 1, 32, 269),
    c(352, 1, 32, 193),
    c(368, 1, 32, 173),
    c(384, 1, 32, 209),
    c(400, 1, 32, 190),
    c(416, 1, 32, 187),
    c(448, 1, 32, 236),
    c(480, 1, 32, 198),
    c(512, 1, 32, 356),
    c(576, 1, 32, 241),
    c(640, 1, 32, 213),
    c(704, 1, 32, 193),
    c(768, 1, 32, 191),
    c(896, 1, 32, 205),
    c(1024, 1, 32, 332),
    c(1152, 2, 32, 197),
    c(1280, 2, 32, 180),
    c(1408, 2, 32, 172),
    c(1536, 2, 32, 178),
    c(1792, 2, 32, 175),
    c(2048, 2, 32, 204),
    c(2304, 2, 28, 171),
    c(2688, 2, 24, 165),
    c(2816, 3, 23, 154),
    c(3200, 2, 20, 160),
    c(3456, 3, 18, 153),
    c(3584, 4, 18, 152),
    c(4096, 1, 16, 312),
    c(4736, 3, 13, 158),
    c(5376, 2, 12, 153),
    c(6144, 3, 10, 158),
    c(6528, 4, 10, 150),
    c(7168, 7, 9, 152),
    c(8192, 1, 8, 207),
    c(9472, 5, 6, 154),
    c(10240, 4, 6, 150),
    c(12288, 3, 5, 154),
    c(13568, 5, 4, 150),
    c(14336, 7, 4, 149),
    c(16384, 2, 4, 160),
    c(20480, 5, 3, 153),
    c(24576, 3, 2, 152),
    c(28672, 7, 2, 152),
    c(32768, 4, 2, 161),
    c(40960, 5, 2, 150),
    c(49152, 6, 2, 149),
    c(57344, 7, 2, 149),
    c(65536, 8, 2, 153),
    c(73728, 9, 2, 150),
    c(81920, 10, 2, 149),
    c(90112, 11, 2, 148),
    c(98304, 12, 2, 149),
    c(106496, 13, 2, 148),
    c(114688, 14, 2, 148),
    c(131072, 16, 2, 149),
    c(139264, 17, 2, 149),
    c(147456, 18, 2, 148),
    c(155648, 19, 2, 148),
    c(172032, 21, 2, 148),
    c(188416, 23, 2, 148),
    c(204800, 25, 2, 148),
    c(221184, 27, 2, 148),
    c(237568, 29, 2, 146),
    c(262144, 32, 2, 148),
];

/// 32 KiB pages, default new alignment > 8 bytes.
pub static PAGE_32K_ALIGN16: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2249),
    c(16, 1, 32, 2249),
    c(32, 1, 32, 2249),
    c(64, 1, 32, 2249),
    c(80, 1, 32, 2249),
    c(96, 1, 32, 2100),
    c(112, 1, 32, 1138),
    c(128, 1, 32, 1563),
    c(144, 1, 32, 739),
    c(160, 1, 32, 615),
    c(176, 1, 32, 402),
    c(192, 1, 32, 509),
    c(208, 1, 32, 279),
    c(224, 1, 32, 359),
    c(240, 1, 32, 355),
    c(256, 1, 32, 666),
    c(288, 1, 32, 382),
    c(304, 1, 32, 234),
    c(320, 1, 32, 208),
    c(352, 1, 32, 355),
    c(384, 1, 32, 244),
    c(400, 1, 32, 176),
    c(448, 1, 32, 246),
    c(480, 1, 32, 254),
    c(512, 1, 32, 304),
    c(576, 1, 32, 234),
    c(640, 1, 32, 269),
    c(704, 1, 32, 222),
    c(768, 1, 32, 204),
    c(832, 1, 32, 208),
    c(896, 1, 32, 182),
    c(1024, 1, 32, 328),
    c(1152, 1, 32, 203),
    c(1280, 1, 32, 186),
    c(1408, 1, 32, 186),
    c(1536, 1, 32, 178),
    c(1792, 1, 32, 174),
    c(1920, 1, 32, 149),
    c(2048, 1, 32, 183),
    c(2176, 1, 30, 177),
    c(2304, 1, 28, 153),
    c(2432, 1, 26, 150),
    c(2688, 1, 24, 160),
    c(2944, 1, 22, 149),
    c(3200, 1, 20, 153),
    c(3584, 1, 18, 150),
    c(4096, 1, 16, 297),
    c(4608, 1, 14, 157),
    c(5376, 1, 12, 152),
    c(6528, 1, 10, 163),
    c(7168, 2, 9, 143),
    c(8192, 1, 8, 177),
    c(9344, 2, 7, 150),
    c(10880, 1, 6, 145),
    c(13056, 2, 5, 146),
    c(13952, 3, 4, 142),
    c(16384, 1, 4, 165),
    c(19072, 3, 3, 148),
    c(21760, 2, 3, 143),
    c(24576, 3, 2, 143),
    c(26112, 4, 2, 142),
    c(28672, 7, 2, 145),
    c(32768, 1, 2, 157),
    c(38144, 5, 2, 143),
    c(40960, 4, 2, 141),
    c(49152, 3, 2, 142),
    c(57344, 7, 2, 143),
    c(65536, 2, 2, 147),
    c(81920, 5, 2, 144),
    c(98304, 3, 2, 142),
    c(114688, 7, 2, 141),
    c(131072, 4, 2, 161),
    c(163840, 5, 2, 141),
    c(196608, 6, 2, 142),
    c(229376, 7, 2, 136),
    c(262144, 8, 2, 143),
];

/// 256 KiB pages, default new alignment > 8 bytes.
pub static PAGE_256K_ALIGN16: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2368),
    c(16, 1, 32, 2368),
    c(32, 1, 32, 2368),
    c(64, 1, 32, 2371),
    c(80, 1, 32, 2368),
    c(96, 1, 32, 1006),
    c(112, 1, 32, 834),
    c(128, 1, 32, 871),
    c(144, 1, 32, 733),
    c(160, 1, 32, 633),
    c(176, 1, 32, 302),
    c(192, 1, 32, 347),
    c(208, 1, 32, 268),
    c(224, 1, 32, 466),
    c(256, 1, 32, 584),
    c(288, 1, 32, 446),
    c(320, 1, 32, 342),
    c(336, 1, 32, 321),
    c(368, 1, 32, 199),
    c(400, 1, 32, 257),
    c(448, 1, 32, 259),
    c(480, 1, 32, 188),
    c(512, 1, 32, 275),
    c(576, 1, 32, 246),
    c(640, 1, 32, 235),
    c(704, 1, 32, 197),
    c(768, 1, 32, 190),
    c(896, 1, 32, 210),
    c(1024, 1, 32, 296),
    c(1152, 1, 32, 198),
    c(1280, 1, 32, 182),
    c(1408, 1, 32, 168),
    c(1536, 1, 32, 168),
    c(1664, 1, 32, 221),
    c(1920, 1, 32, 209),
    c(2048, 1, 32, 191),
    c(2176, 1, 30, 278),
    c(2304, 1, 28, 171),
    c(2560, 1, 25, 165),
    c(2816, 1, 23, 155),
    c(3072, 1, 21, 155),
    c(3328, 1, 19, 167),
    c(3584, 1, 18, 153),
    c(3840, 1, 17, 153),
    c(4096, 1, 16, 251),
    c(4224, 1, 15, 156),
    c(4736, 1, 13, 160),
    c(5120, 1, 12, 158),
    c(5632, 1, 11, 160),
    c(6144, 1, 10, 153),
    c(6528, 1, 10, 154),
    c(7168, 1, 9, 150),
    c(8192, 1, 8, 180),
    c(8704, 1, 7, 150),
    c(9344, 1, 7, 153),
    c(10368, 1, 6, 151),
    c(11392, 1, 5, 154),
    c(12416, 1, 5, 153),
    c(13056, 1, 5, 150),
    c(13696, 1, 4, 149),
    c(14464, 1, 4, 149),
    c(15360, 1, 4, 149),
    c(16384, 1, 4, 161),
    c(17408, 1, 3, 150),
    c(18688, 1, 3, 151),
    c(20096, 1, 3, 149),
    c(21760, 1, 3, 149),
    c(23808, 1, 2, 151),
    c(26112, 1, 2, 150),
    c(29056, 1, 2, 149),
    c(32768, 1, 2, 182),
    c(37376, 1, 2, 150),
    c(43648, 1, 2, 149),
    c(45568, 2, 2, 148),
    c(52352, 1, 2, 149),
    c(56064, 2, 2, 148),
    c(65536, 1, 2, 150),
    c(74880, 2, 2, 148),
    c(87296, 1, 2, 148),
    c(104832, 2, 2, 148),
    c(112256, 3, 2, 148),
    c(131072, 1, 2, 148),
    c(149760, 3, 2, 148),
    c(174720, 2, 2, 148),
    c(196608, 3, 2, 148),
    c(209664, 4, 2, 148),
    c(262144, 1, 2, 150),
];

/// 4 KiB pages, default new alignment <= 8 bytes.
pub static PAGE_4K_ALIGN8: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2622),
    c(16, 1, 32, 2622),
    c(32, 1, 32, 2622),
    c(64, 1, 32, 2622),
    c(72, 1, 32, 927),
    c(80, 1, 32, 2622),
    c(96, 1, 32, 2160),
    c(104, 1, 32, 670),
    c(112, 1, 32, 1197),
    c(128, 1, 32, 1607),
    c(144, 1, 32, 1292),
    c(160, 1, 32, 1167),
    c(176, 1, 32, 563),
    c(192, 1, 32, 610),
    c(208, 1, 32, 394),
    c(224, 1, 32, 551),
    c(240, 1, 32, 319),
    c(256, 1, 32, 598),
    c(272, 1, 32, 260),
    c(288, 1, 32, 301),
    c(336, 1, 32, 579),
    c(408, 1, 32, 250),
    c(448, 1, 32, 225),
    c(512, 1, 32, 739),
    c(576, 2, 32, 338),
    c(640, 2, 32, 188),
    c(768, 2, 32, 334),
    c(896, 2, 32, 287),
    c(1024, 2, 32, 964),
    c(1152, 3, 32, 210),
    c(1280, 3, 32, 164),
    c(1536, 3, 32, 204),
    c(2048, 4, 32, 530),
    c(2304, 4, 28, 191),
    c(2688, 4, 24, 181),
    c(3200, 4, 20, 166),
    c(4096, 4, 16, 624),
    c(4736, 5, 13, 213),
    c(6144, 3, 10, 168),
    c(7168, 7, 9, 169),
    c(8192, 4, 8, 236),
];

/// 8 KiB pages, default new alignment <= 8 bytes.
pub static PAGE_8K_ALIGN8: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 2024),
    c(16, 1, 32, 2024),
    c(32, 1, 32, 2027),
    c(64, 1, 32, 2024),
    c(72, 1, 32, 1275),
    c(80, 1, 32, 2024),
    c(88, 1, 32, 1031),
    c(96, 1, 32, 1206),
    c(104, 1, 32, 489),
    c(112, 1, 32, 804),
    c(120, 1, 32, 505),
    c(128, 1, 32, 957),
    c(136, 1, 32, 355),
    c(144, 1, 32, 646),
    c(160, 1, 32, 721),
    c(176, 1, 32, 378),
    c(192, 1, 32, 491),
    c(208, 1, 32, 326),
    c(224, 1, 32, 284),
    c(240, 1, 32, 266),
    c(256, 1, 32, 613),
    c(264, 1, 32, 155),
    c(280, 1, 32, 292),
    c(312, 1, 32, 347),
    c(336, 1, 32, 360),
    c(352, 1, 32, 188),
    c(384, 1, 32, 244),
    c(408, 1, 32, 213),
    c(424, 1, 32, 162),
    c(448, 1, 32, 232),
    c(480, 1, 32, 194),
    c(512, 1, 32, 409),
    c(576, 1, 32, 252),
    c(640, 1, 32, 214),
    c(704, 1, 32, 188),
    c(768, 1, 32, 185),
    c(896, 1, 32, 203),
    c(1024, 1, 32, 377),
    c(1152, 2, 32, 192),
    c(1280, 2, 32, 170),
    c(1408, 2, 32, 160),
    c(1536, 2, 32, 166),
    c(1792, 2, 32, 163),
    c(2048, 2, 32, 202),
    c(2304, 2, 28, 158),
    c(2688, 2, 24, 149),
    c(2816, 3, 23, 134),
    c(3200, 2, 20, 141),
    c(3456, 3, 18, 133),
    c(3584, 4, 18, 131),
    c(4096, 1, 16, 350),
    c(4736, 3, 13, 140),
    c(5376, 2, 12, 132),
    c(6144, 3, 10, 140),
    c(7168, 7, 9, 134),
    c(8192, 1, 8, 207),
    c(9472, 5, 6, 134),
    c(10240, 4, 6, 129),
    c(12288, 3, 5, 134),
    c(13568, 5, 4, 129),
    c(14336, 7, 4, 128),
    c(16384, 2, 4, 141),
    c(20480, 5, 3, 132),
    c(24576, 3, 2, 131),
    c(28672, 7, 2, 130),
    c(32768, 4, 2, 143),
    c(40960, 5, 2, 130),
    c(49152, 6, 2, 128),
    c(57344, 7, 2, 128),
    c(65536, 8, 2, 133),
    c(73728, 9, 2, 129),
    c(81920, 10, 2, 128),
    c(98304, 12, 2, 128),
    c(114688, 14, 2, 128),
    c(131072, 16, 2, 128),
    c(139264, 17, 2, 128),
    c(155648, 19, 2, 127),
    c(172032, 21, 2, 127),
    c(204800, 25, 2, 127),
    c(229376, 28, 2, 127),
    c(262144, 32, 2, 128),
];

/// 32 KiB pages, default new alignment <= 8 bytes.
pub static PAGE_32K_ALIGN8: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 1824),
    c(16, 1, 32, 1824),
    c(32, 1, 32, 1824),
    c(64, 1, 32, 1824),
    c(72, 1, 32, 1241),
    c(80, 1, 32, 1824),
    c(88, 1, 32, 1267),
    c(96, 1, 32, 1590),
    c(104, 1, 32, 718),
    c(112, 1, 32, 844),
    c(120, 1, 32, 678),
    c(128, 1, 32, 1447),
    c(136, 1, 32, 428),
    c(144, 1, 32, 599),
    c(160, 1, 32, 744),
    c(176, 1, 32, 461),
    c(192, 1, 32, 603),
    c(208, 1, 32, 297),
    c(240, 1, 32, 686),
    c(256, 1, 32, 811),
    c(280, 1, 32, 385),
    c(304, 1, 32, 289),
    c(320, 1, 32, 203),
    c(352, 1, 32, 398),
    c(400, 1, 32, 298),
    c(448, 1, 32, 255),
    c(512, 1, 32, 480),
    c(576, 1, 32, 238),
    c(640, 1, 32, 284),
    c(704, 1, 32, 223),
    c(768, 1, 32, 198),
    c(896, 1, 32, 257),
    c(1024, 1, 32, 364),
    c(1152, 1, 32, 197),
    c(1280, 1, 32, 175),
    c(1408, 1, 32, 175),
    c(1536, 1, 32, 163),
    c(1792, 1, 32, 158),
    c(1920, 1, 32, 126),
    c(2048, 1, 32, 170),
    c(2176, 1, 30, 162),
    c(2304, 1, 28, 130),
    c(2688, 1, 24, 153),
    c(3200, 1, 20, 142),
    c(3584, 1, 18, 127),
    c(4096, 1, 16, 321),
    c(4608, 1, 14, 135),
    c(5376, 1, 12, 128),
    c(6528, 1, 10, 143),
    c(8192, 1, 8, 165),
    c(9344, 2, 7, 127),
    c(10880, 1, 6, 120),
    c(13056, 2, 5, 122),
    c(13952, 3, 4, 116),
    c(16384, 1, 4, 146),
    c(19072, 3, 3, 125),
    c(21760, 2, 3, 117),
    c(24576, 3, 2, 117),
    c(28672, 7, 2, 121),
    c(32768, 1, 2, 135),
    c(38144, 5, 2, 117),
    c(40960, 4, 2, 114),
    c(49152, 3, 2, 115),
    c(57344, 7, 2, 117),
    c(65536, 2, 2, 123),
    c(81920, 5, 2, 118),
    c(98304, 3, 2, 115),
    c(114688, 7, 2, 115),
    c(131072, 4, 2, 142),
    c(163840, 5, 2, 115),
    c(196608, 6, 2, 115),
    c(229376, 7, 2, 113),
    c(262144, 8, 2, 117),
];

/// 256 KiB pages, default new alignment <= 8 bytes.
pub static PAGE_256K_ALIGN8: &[SizeClassDescriptor] = &[
    c(0, 0, 0, 0),
    c(8, 1, 32, 1912),
    c(16, 1, 32, 1912),
    c(32, 1, 32, 1912),
    c(64, 1, 32, 1918),
    c(72, 1, 32, 1912),
    c(80, 1, 32, 1691),
    c(88, 1, 32, 632),
    c(96, 1, 32, 898),
    c(104, 1, 32, 510),
    c(112, 1, 32, 758),
    c(128, 1, 32, 1197),
    c(144, 1, 32, 992),
    c(160, 1, 32, 841),
    c(176, 1, 32, 348),
    c(192, 1, 32, 415),
    c(208, 1, 32, 299),
    c(232, 1, 32, 623),
    c(256, 1, 32, 737),
    c(280, 1, 32, 365),
    c(312, 1, 32, 538),
    c(336, 1, 32, 448),
    c(376, 1, 32, 220),
    c(416, 1, 32, 295),
    c(472, 1, 32, 275),
    c(512, 1, 32, 339),
    c(576, 1, 32, 266),
    c(704, 1, 32, 320),
    c(768, 1, 32, 181),
    c(896, 1, 32, 212),
    c(1024, 1, 32, 340),
    c(1152, 1, 32, 194),
    c(1280, 1, 32, 170),
    c(1408, 1, 32, 148),
    c(1664, 1, 32, 258),
    c(1920, 1, 32, 212),
    c(2048, 1, 32, 183),
    c(2176, 1, 30, 312),
    c(2304, 1, 28, 153),
    c(2560, 1, 25, 146),
    c(2816, 1, 23, 129),
    c(3072, 1, 21, 130),
    c(3328, 1, 19, 147),
    c(3584, 1, 18, 126),
    c(3840, 1, 17, 126),
    c(4096, 1, 16, 273),
    c(4224, 1, 15, 132),
    c(4736, 1, 13, 136),
    c(5248, 1, 12, 147),
    c(5760, 1, 11, 127),
    c(6528, 1, 10, 134),
    c(7168, 1, 9, 123),
    c(8192, 1, 8, 167),
    c(9344, 1, 7, 130),
    c(10880, 1, 6, 126),
    c(11904, 1, 5, 129),
    c(13056, 1, 5, 126),
    c(13696, 1, 4, 120),
    c(14464, 1, 4, 121),
    c(15360, 1, 4, 121),
    c(16384, 1, 4, 139),
    c(17408, 1, 3, 123),
    c(18688, 1, 3, 125),
    c(20096, 1, 3, 120),
    c(21760, 1, 3, 121),
    c(23808, 1, 2, 125),
    c(26112, 1, 2, 122),
    c(29056, 1, 2, 120),
    c(32768, 1, 2, 170),
    c(37376, 1, 2, 122),
    c(43648, 1, 2, 120),
    c(45568, 2, 2, 119),
    c(52352, 1, 2, 120),
    c(56064, 2, 2, 119),
    c(65536, 1, 2, 122),
    c(74880, 2, 2, 120),
    c(87296, 1, 2, 120),
    c(104832, 2, 2, 120),
    c(112256, 3, 2, 119),
    c(131072, 1, 2, 120),
    c(149760, 3, 2, 119),
    c(174720, 2, 2, 119),
    c(196608, 3, 2, 119),
    c(209664, 4, 2, 119),
    c(262144, 1, 2, 122),
];

/// Returns the certified literal for `key`.
pub fn certified(key: ConfigKey) -> &'static [SizeClassDescriptor] {
    match (key.page, key.alignment) {
        (PageSize::K4, AlignmentMode::Align16) => PAGE_4K_ALIGN16,
        (PageSize::K8, AlignmentMode::Align16) => PAGE_8K_ALIGN16,
        (PageSize::K32, AlignmentMode::Align16) => PAGE_32K_ALIGN16,
        (PageSize::K256, AlignmentMode::Align16) => PAGE_256K_ALIGN16,
        (PageSize::K4, AlignmentMode::Align8) => PAGE_4K_ALIGN8,
        (PageSize::K8, AlignmentMode::Align8) => PAGE_8K_ALIGN8,
        (PageSize::K32, AlignmentMode::Align8) => PAGE_32K_ALIGN8,
        (PageSize::K256, AlignmentMode::Align8) => PAGE_256K_ALIGN8,
    }
}
