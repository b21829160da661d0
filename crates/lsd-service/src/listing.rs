//! Listing queries: heavy-use licenses and registered devices.

use lsd_core::types::paging::DeviceFilter;
use lsd_core::AppResult;
use lsd_entity::event::RegisteredDevices;
use lsd_entity::status::LicenseStatus;

use crate::lifecycle::LicenseStatusService;

impl LicenseStatusService {
    /// Licenses whose device count reached the filter threshold, in id
    /// order. Used to spot licenses activated on many devices.
    pub async fn list_heavy_use(&self, filter: &DeviceFilter) -> AppResult<Vec<LicenseStatus>> {
        filter.validate()?;
        self.statuses().list_heavy_use(filter).await
    }

    /// The devices currently registered on a license: those whose most
    /// recent event is a register or renew.
    pub async fn registered_devices(&self, license_ref: &str) -> AppResult<RegisteredDevices> {
        let status = self.load(license_ref).await?;
        let devices = self.events().registered_devices(status.id).await?;

        Ok(RegisteredDevices {
            id: status.license_ref,
            devices,
        })
    }
}
