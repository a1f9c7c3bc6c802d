//! Simulation statistics collection and reporting.

use serde::Serialize;
use std::time::Instant;

/// Execution counters accumulated over a run.
///
/// The struct serialises to JSON for the `--stats-json` export; the
/// wall-clock start time is host-side only and is skipped.
#[derive(Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub inst_alu: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_branch: u64,
    pub inst_dma: u64,

    pub branches_taken: u64,
    pub branches_not_taken: u64,
    pub speculative_redirects: u64,
    pub branch_flushes: u64,

    pub stalls_data: u64,
    pub stalls_store_load: u64,

    pub dma_words_copied: u64,
    pub dma_wait_cycles: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_dma: 0,
            branches_taken: 0,
            branches_not_taken: 0,
            speculative_redirects: 0,
            branch_flushes: 0,
            stalls_data: 0,
            stalls_store_load: 0,
            dma_words_copied: 0,
            dma_wait_cycles: 0,
        }
    }
}

impl SimStats {
    /// Prints the end-of-run report.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;
        let khz = (self.cycles as f64 / seconds) / 1000.0;

        println!("\n==========================================================");
        println!("SP SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        let total = instr as f64;
        let mix = |name: &str, count: u64| {
            println!(
                "  op.{:<20} {} ({:.2}%)",
                name,
                count,
                (count as f64 / total) * 100.0
            );
        };
        mix("alu", self.inst_alu);
        mix("load", self.inst_load);
        mix("store", self.inst_store);
        mix("branch", self.inst_branch);
        mix("dma", self.inst_dma);
        println!("----------------------------------------------------------");
        println!("PIPELINE");
        println!(
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls_data,
            (self.stalls_data as f64 / cyc as f64) * 100.0
        );
        println!(
            "  stalls.store_load      {} ({:.2}%)",
            self.stalls_store_load,
            (self.stalls_store_load as f64 / cyc as f64) * 100.0
        );
        println!("  flushes.branch         {}", self.branch_flushes);
        println!("  fetch.redirects        {}", self.speculative_redirects);
        println!("----------------------------------------------------------");
        println!("BRANCHES");
        println!("  taken                  {}", self.branches_taken);
        println!("  not_taken              {}", self.branches_not_taken);
        println!("----------------------------------------------------------");
        println!("DMA");
        println!("  words_copied           {}", self.dma_words_copied);
        println!("  wait_cycles            {}", self.dma_wait_cycles);
        println!("==========================================================");
    }
}
