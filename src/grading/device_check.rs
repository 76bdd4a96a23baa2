//! Device matching

use tracing::debug;

use crate::device::{DeviceHandle, DeviceSpec};
use crate::error::DeviceMismatch;

/// Check a device against the expected backend name and wire count.
///
/// A device that does not expose its name or wires never matches.
pub fn verify_device<D>(device: &D, expected: &DeviceSpec) -> Result<(), DeviceMismatch>
where
    D: DeviceHandle + ?Sized,
{
    let name = device.name().ok_or(DeviceMismatch::MissingAttribute("name"))?;
    if name != expected.name {
        return Err(DeviceMismatch::NameMismatch {
            expected: expected.name.clone(),
            actual: name.to_string(),
        });
    }

    let wires = device.wires().ok_or(DeviceMismatch::MissingAttribute("wires"))?;
    if wires.len() != expected.num_wires {
        return Err(DeviceMismatch::WireCountMismatch {
            expected: expected.num_wires,
            actual: wires.len(),
        });
    }

    debug!(device = name, wires = wires.len(), "device matches");
    Ok(())
}

/// Boolean form of [`verify_device`]
pub fn check_device<D>(device: &D, expected: &DeviceSpec) -> bool
where
    D: DeviceHandle + ?Sized,
{
    verify_device(device, expected).is_ok()
}
