//! Input capabilities and input-core semantics: keys, axes, absolute-axis
//! parameters, and the per-device event frame.

use core::ops::{BitOr, BitOrAssign};

/// Digital button identifiers.
///
/// Only [`Key::C`] and [`Key::Z`] are ever reported by the Nunchuk; the rest
/// are classic-controller buttons that are declared but never reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Key {
    C = 0,
    Z = 1,
    Tl = 2,
    Select = 3,
    Mode = 4,
    Start = 5,
    Tr = 6,
    Tl2 = 7,
    B = 8,
    Y = 9,
    A = 10,
    X = 11,
    Tr2 = 12,
}

impl Key {
    /// Bit index of this key in a [`KeyMask`].
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Absolute axis identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// Key state represented as a bitfield, one bit per [`Key::index`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMask(pub u16);

impl KeyMask {
    /// No keys.
    pub const NONE: Self = Self(0);

    #[inline]
    #[must_use]
    pub const fn of(key: Key) -> Self {
        Self(1 << key.index())
    }

    /// Check if every key in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: KeyMask) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    #[must_use]
    pub const fn is_pressed(self, key: Key) -> bool {
        self.contains(Self::of(key))
    }

    /// Set or clear a key.
    #[inline]
    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.0 |= Self::of(key).0;
        } else {
            self.0 &= !Self::of(key).0;
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl BitOr for KeyMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyMask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Absolute axis parameters: range, noise filter, and dead zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsInfo {
    pub minimum: i32,
    pub maximum: i32,
    /// Changes smaller than this are treated as noise.
    pub fuzz: i32,
    /// Values within this distance of the center read as centered.
    pub flat: i32,
}

impl AbsInfo {
    #[must_use]
    pub const fn new(minimum: i32, maximum: i32, fuzz: i32, flat: i32) -> Self {
        Self {
            minimum,
            maximum,
            fuzz,
            flat,
        }
    }

    #[inline]
    #[must_use]
    pub const fn center(&self) -> i32 {
        (self.minimum + self.maximum) / 2
    }

    #[inline]
    #[must_use]
    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.minimum, self.maximum)
    }

    /// Filter `value` against the previous value using the fuzz.
    ///
    /// Inside half the fuzz the old value is kept, inside the fuzz the
    /// result leans 3:1 towards the old value, inside twice the fuzz 1:1.
    #[must_use]
    pub fn defuzz(&self, old: i32, value: i32) -> i32 {
        let fuzz = self.fuzz;
        if fuzz == 0 {
            return value;
        }

        if value > old - fuzz / 2 && value < old + fuzz / 2 {
            return old;
        }
        if value > old - fuzz && value < old + fuzz {
            return (old * 3 + value) / 4;
        }
        if value > old - fuzz * 2 && value < old + fuzz * 2 {
            return (old + value) / 2;
        }
        value
    }

    /// Map `value` onto `-127..=127`, clamping to the range and snapping
    /// the flat zone to 0.
    #[must_use]
    pub fn normalize(&self, value: i32) -> i8 {
        let value = self.clamp(value);
        let center = self.center();
        let offset = value - center;

        if offset.abs() <= self.flat {
            return 0;
        }

        let span = if offset > 0 {
            self.maximum - center
        } else {
            center - self.minimum
        };
        if span <= 0 {
            return 0;
        }

        (offset * 127 / span).clamp(-127, 127) as i8
    }
}

/// Bus a device is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusType {
    I2c,
}

/// Capabilities an input device declares when it registers with a sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub name: &'static str,
    pub bus: BusType,
    pub keys: &'static [Key],
    pub axes: &'static [(Axis, AbsInfo)],
}

impl InputDeviceInfo {
    /// Check whether `key` was declared.
    #[must_use]
    pub fn has_key(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Get the parameters declared for `axis`.
    #[must_use]
    pub fn abs_info(&self, axis: Axis) -> Option<AbsInfo> {
        self.axes
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, info)| *info)
    }

    /// All declared keys as a mask.
    #[must_use]
    pub fn key_mask(&self) -> KeyMask {
        let mut mask = KeyMask::NONE;
        for key in self.keys {
            mask |= KeyMask::of(*key);
        }
        mask
    }
}

/// X axis: range 30-220, fuzz 4, flat 8.
pub const NUNCHUK_ABS_X: AbsInfo = AbsInfo::new(30, 220, 4, 8);
/// Y axis: range 40-200, fuzz 4, flat 8.
pub const NUNCHUK_ABS_Y: AbsInfo = AbsInfo::new(40, 200, 4, 8);

/// Declared keys: C and Z, then the classic-controller buttons.
pub const NUNCHUK_KEYS: [Key; 13] = [
    Key::C,
    Key::Z,
    Key::Tl,
    Key::Select,
    Key::Mode,
    Key::Start,
    Key::Tr,
    Key::Tl2,
    Key::B,
    Key::Y,
    Key::A,
    Key::X,
    Key::Tr2,
];

/// Everything the Nunchuk declares at attach time.
pub const NUNCHUK_INFO: InputDeviceInfo = InputDeviceInfo {
    name: "Wii Nunchuk",
    bus: BusType::I2c,
    keys: &NUNCHUK_KEYS,
    axes: &[(Axis::X, NUNCHUK_ABS_X), (Axis::Y, NUNCHUK_ABS_Y)],
};

/// Accumulated input state of one registered device.
///
/// Applies what an input core does with reported values: undeclared keys
/// and axes are dropped, axis values are fuzz-filtered, and a frame only
/// counts as changed when a stored value actually moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputFrame {
    declared: KeyMask,
    keys: KeyMask,
    abs: [Option<AbsInfo>; 2],
    values: [i32; 2],
    changed: bool,
}

impl InputFrame {
    #[must_use]
    pub fn new(info: &InputDeviceInfo) -> Self {
        Self {
            declared: info.key_mask(),
            keys: KeyMask::NONE,
            abs: Axis::ALL.map(|axis| info.abs_info(axis)),
            values: [0; 2],
            changed: false,
        }
    }

    pub fn report_key(&mut self, key: Key, pressed: bool) {
        if !self.declared.is_pressed(key) || self.keys.is_pressed(key) == pressed {
            return;
        }
        self.keys.set(key, pressed);
        self.changed = true;
    }

    pub fn report_abs(&mut self, axis: Axis, value: i32) {
        let Some(info) = self.abs[axis.index()] else {
            return;
        };
        let old = self.values[axis.index()];
        let value = info.defuzz(old, value);
        if value != old {
            self.values[axis.index()] = value;
            self.changed = true;
        }
    }

    /// Close the current batch, returning whether anything changed in it.
    pub fn sync(&mut self) -> bool {
        core::mem::replace(&mut self.changed, false)
    }

    /// The frame returned by the last [`InputFrame::sync`] never reached the
    /// host. The next sync reports it again even if nothing moves meanwhile.
    pub fn mark_undelivered(&mut self) {
        self.changed = true;
    }

    #[inline]
    #[must_use]
    pub fn keys(&self) -> KeyMask {
        self.keys
    }

    /// Last stored (defuzzed) value of `axis`.
    #[inline]
    #[must_use]
    pub fn value(&self, axis: Axis) -> i32 {
        self.values[axis.index()]
    }

    /// Last stored value of `axis` mapped onto `-127..=127`.
    #[must_use]
    pub fn normalized(&self, axis: Axis) -> i8 {
        match self.abs[axis.index()] {
            Some(info) => info.normalize(self.values[axis.index()]),
            None => 0,
        }
    }

    /// Stick position in HID orientation: X grows to the right, Y grows
    /// downward. Nunchuk Y grows when pushed up, so it is flipped here.
    #[must_use]
    pub fn hid_stick(&self) -> (i8, i8) {
        // normalize() never yields i8::MIN
        (self.normalized(Axis::X), -self.normalized(Axis::Y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mask_set_clear() {
        let mut keys = KeyMask::NONE;
        keys.set(Key::Z, true);
        assert!(keys.is_pressed(Key::Z));
        assert!(!keys.is_pressed(Key::C));
        keys.set(Key::Z, false);
        assert_eq!(keys, KeyMask::NONE);
    }

    #[test]
    fn test_nunchuk_info_declares_all_keys() {
        assert_eq!(NUNCHUK_INFO.keys.len(), 13);
        assert!(NUNCHUK_INFO.has_key(Key::C));
        assert!(NUNCHUK_INFO.has_key(Key::Tr2));
        assert_eq!(NUNCHUK_INFO.key_mask().raw(), 0x1FFF);
        assert_eq!(NUNCHUK_INFO.abs_info(Axis::X), Some(NUNCHUK_ABS_X));
        assert_eq!(NUNCHUK_INFO.abs_info(Axis::Y), Some(AbsInfo::new(40, 200, 4, 8)));
    }

    #[test]
    fn test_defuzz_bands() {
        let info = AbsInfo::new(0, 255, 4, 0);
        // within fuzz/2: keep old
        assert_eq!(info.defuzz(100, 101), 100);
        // within fuzz: 3:1
        assert_eq!(info.defuzz(100, 103), 100);
        assert_eq!(info.defuzz(100, 97), 99);
        // within 2*fuzz: 1:1
        assert_eq!(info.defuzz(100, 106), 103);
        // outside: take new
        assert_eq!(info.defuzz(100, 110), 110);
    }

    #[test]
    fn test_defuzz_without_fuzz_is_identity() {
        let info = AbsInfo::new(0, 255, 0, 0);
        assert_eq!(info.defuzz(100, 101), 101);
    }

    #[test]
    fn test_normalize_clamps_and_flattens() {
        let info = NUNCHUK_ABS_X; // center 125
        assert_eq!(info.normalize(0), -127);
        assert_eq!(info.normalize(30), -127);
        assert_eq!(info.normalize(255), 127);
        assert_eq!(info.normalize(220), 127);
        assert_eq!(info.normalize(125), 0);
        assert_eq!(info.normalize(133), 0);
        assert_eq!(info.normalize(117), 0);
        assert!(info.normalize(134) > 0);
        assert!(info.normalize(116) < 0);
    }

    #[test]
    fn test_frame_drops_undeclared_and_unchanged() {
        let mut frame = InputFrame::new(&NUNCHUK_INFO);
        frame.report_key(Key::C, false);
        assert!(!frame.sync());

        frame.report_key(Key::C, true);
        assert!(frame.sync());
        assert!(frame.keys().is_pressed(Key::C));

        frame.report_key(Key::C, true);
        assert!(!frame.sync());
    }

    #[test]
    fn test_frame_filters_axis_noise() {
        let mut frame = InputFrame::new(&NUNCHUK_INFO);
        frame.report_abs(Axis::X, 128);
        assert!(frame.sync());
        assert_eq!(frame.value(Axis::X), 128);

        frame.report_abs(Axis::X, 129);
        assert!(!frame.sync());
        assert_eq!(frame.value(Axis::X), 128);

        frame.report_abs(Axis::X, 200);
        assert!(frame.sync());
        assert_eq!(frame.value(Axis::X), 200);
        assert!(frame.normalized(Axis::X) > 0);
    }

    #[test]
    fn test_frame_resends_after_undelivered_sync() {
        let mut frame = InputFrame::new(&NUNCHUK_INFO);
        frame.report_key(Key::C, true);
        assert!(frame.sync());
        frame.mark_undelivered();

        // same values on the next tick still go out
        frame.report_key(Key::C, true);
        assert!(frame.sync());
        assert!(frame.keys().is_pressed(Key::C));

        frame.report_key(Key::C, true);
        assert!(!frame.sync());
    }

    #[test]
    fn test_hid_stick_points_y_down() {
        let mut frame = InputFrame::new(&NUNCHUK_INFO);
        frame.report_abs(Axis::X, 220);
        frame.report_abs(Axis::Y, 200);
        assert_eq!(frame.hid_stick(), (127, -127));

        frame.report_abs(Axis::X, 30);
        frame.report_abs(Axis::Y, 40);
        assert_eq!(frame.hid_stick(), (-127, 127));

        frame.report_abs(Axis::Y, 120);
        assert_eq!(frame.hid_stick().1, 0);
    }

    #[test]
    fn test_frame_ignores_undeclared_axis() {
        const KEYS_ONLY: InputDeviceInfo = InputDeviceInfo {
            name: "keys",
            bus: BusType::I2c,
            keys: &[Key::A],
            axes: &[],
        };
        let mut frame = InputFrame::new(&KEYS_ONLY);
        frame.report_abs(Axis::Y, 90);
        frame.report_key(Key::C, true);
        assert!(!frame.sync());
        assert_eq!(frame.normalized(Axis::Y), 0);
    }
}
