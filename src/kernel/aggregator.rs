use tracing::{debug, trace};

use crate::config::Config;
use crate::host::PageEnvironment;
use crate::kernel::event::PageEvent;
use crate::kernel::record::DataRecord;
use crate::kernel::recorders::{BuiltinRecorder, Recorder};

pub const PATH: &str = "path";

struct Registered {
    name: String,
    recorder: Box<dyn Recorder>,
}

/// Owns the data record and every registered recorder.
///
/// Events are dispatched one at a time, so recorders never race over the
/// record even though none of them lock it.
pub struct Aggregator {
    record: DataRecord,
    recorders: Vec<Registered>,
}

impl Aggregator {
    pub fn new(record: DataRecord) -> Self {
        Self {
            record,
            recorders: Vec::new(),
        }
    }

    /// Seeds the record from config and registers the enabled built-ins,
    /// then every custom recorder. `attach` hooks run immediately.
    pub fn from_config(config: &mut Config, env: &dyn PageEnvironment) -> Self {
        let mut record = DataRecord::new();
        record.merge(std::mem::take(&mut config.data));
        record.set_default(PATH, env.location_path());

        let mut aggregator = Self::new(record);

        for builtin in BuiltinRecorder::ALL {
            if config.is_enabled(builtin) {
                aggregator.register(builtin.name(), builtin.build(), env);
            } else {
                debug!("Recorder {} disabled", builtin.name());
            }
        }

        for (name, recorder) in config.recorders.drain(..) {
            aggregator.register(&name, recorder, env);
        }

        aggregator
    }

    pub fn register(&mut self, name: &str, mut recorder: Box<dyn Recorder>, env: &dyn PageEnvironment) {
        recorder.attach(&mut self.record, env);
        self.recorders.push(Registered {
            name: name.to_string(),
            recorder,
        });
    }

    pub fn dispatch(&mut self, event: &PageEvent) {
        trace!("Dispatching {:?} to {} recorders", event, self.recorders.len());
        for entry in self.recorders.iter_mut() {
            entry.recorder.observe(event, &mut self.record);
        }
    }

    pub fn record(&self) -> &DataRecord {
        &self.record
    }

    pub fn into_record(self) -> DataRecord {
        self.record
    }

    pub fn recorder_names(&self) -> Vec<&str> {
        self.recorders.iter().map(|r| r.name.as_str()).collect()
    }
}
