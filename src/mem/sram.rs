//! Single-ported synchronous SRAM.
//!
//! The SRAM has one port and one registered read path: a `read` issued
//! during cycle N drives the dataout latch from cycle N+1 until the next
//! read completes. Writes commit the previously set datain word within
//! the issuing cycle. `inject` and `extract` are combinational accesses
//! used for image loading, dumping and the DMA copy path; they do not
//! disturb the dataout latch.

/// Number of 32-bit words in each SRAM (16-bit address space).
pub const SRAM_WORDS: usize = 64 * 1024;

/// A 64K-word synchronous SRAM with a registered read port.
#[derive(Clone, Debug)]
pub struct Sram {
    cells: Vec<u32>,
    dataout: u32,
    datain: u32,
    pending_read: Option<u16>,
}

impl Sram {
    /// Creates a zero-filled SRAM.
    pub fn new() -> Self {
        Self {
            cells: vec![0; SRAM_WORDS],
            dataout: 0,
            datain: 0,
            pending_read: None,
        }
    }

    /// Issues a read. The word becomes visible on [`Sram::dataout`]
    /// after the next [`Sram::tick`].
    pub fn read(&mut self, addr: u16) {
        self.pending_read = Some(addr);
    }

    /// Sets the word a subsequent [`Sram::write`] will commit.
    pub fn set_datain(&mut self, value: u32) {
        self.datain = value;
    }

    /// Writes the current datain word to `addr`.
    pub fn write(&mut self, addr: u16) {
        self.cells[usize::from(addr)] = self.datain;
    }

    /// Host-side store, used only while loading the program image.
    pub fn inject(&mut self, addr: u16, value: u32) {
        self.cells[usize::from(addr)] = value;
    }

    /// Combinational read of a cell.
    pub fn extract(&self, addr: u16) -> u32 {
        self.cells[usize::from(addr)]
    }

    /// The read latch: the word captured by the most recently completed
    /// read. Holds its value across cycles with no read activity.
    pub fn dataout(&self) -> u32 {
        self.dataout
    }

    /// Clock edge: captures any pending read into the dataout latch.
    pub fn tick(&mut self) {
        if let Some(addr) = self.pending_read.take() {
            self.dataout = self.cells[usize::from(addr)];
        }
    }
}

impl Default for Sram {
    fn default() -> Self {
        Self::new()
    }
}
