extern crate std;

use core::cell::RefCell;
use embassy_usb::driver::{
    Endpoint, EndpointAddress, EndpointError, EndpointIn, EndpointInfo, EndpointType,
};
use std::rc::Rc;
use std::vec::Vec;

/// Packets written to a [MyEndpointIn], in write order.
#[derive(Clone, Default)]
pub struct Packets(Rc<RefCell<Vec<Vec<u8>>>>);
impl Packets {
    pub fn take(&self) -> Vec<Vec<u8>> {
        self.0.take()
    }
}

pub struct MyEndpointIn {
    pub packets: Packets,
    pub info: EndpointInfo,
}
impl MyEndpointIn {
    pub fn with_max_packet_size(max_packet_size: u16) -> Self {
        let mut ep = Self::default();
        ep.info.max_packet_size = max_packet_size;
        ep
    }
}
impl Endpoint for MyEndpointIn {
    fn info(&self) -> &EndpointInfo {
        &self.info
    }

    async fn wait_enabled(&mut self) {}
}
impl EndpointIn for MyEndpointIn {
    async fn write(&mut self, buf: &[u8]) -> Result<(), EndpointError> {
        self.packets.0.borrow_mut().push(Vec::from(buf));
        Ok(())
    }
}
impl Default for MyEndpointIn {
    fn default() -> Self {
        Self {
            packets: Packets::default(),
            info: EndpointInfo {
                addr: EndpointAddress::from(0x81),
                ep_type: EndpointType::Interrupt,
                max_packet_size: 64,
                interval_ms: 1,
            },
        }
    }
}

/// A [ReportWriter](crate::ReportWriter) that keeps every report.
#[derive(Clone, Default)]
pub struct ReportLog(Rc<RefCell<Vec<Vec<u8>>>>);
impl ReportLog {
    pub fn take(&self) -> Vec<Vec<u8>> {
        self.0.take()
    }
}
impl crate::ReportWriter for ReportLog {
    async fn write_report(&mut self, report: &[u8]) -> Result<(), EndpointError> {
        self.0.borrow_mut().push(Vec::from(report));
        Ok(())
    }
}

/// Fails every write.
pub struct BrokenWriter;
impl crate::ReportWriter for BrokenWriter {
    async fn write_report(&mut self, _report: &[u8]) -> Result<(), EndpointError> {
        Err(EndpointError::Disabled)
    }
}
