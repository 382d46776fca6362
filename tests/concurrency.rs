//! Lock discipline of the dispatcher under concurrent access.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
    time::Duration,
};

use async_trait::async_trait;
use futures::future::join_all;
use mpris_properties::{
    GetterTable, InterfaceRegistry, PropertiesDispatcher, PropertyProvider, SetterTable,
    SignalEmitter,
};
use zbus::zvariant::{OwnedValue, Value};

const INTERFACE: &str = "org.test.Probe";

/// Entry/exit instrumentation shared by getters, the setter and the signal
/// emitter. A write is counted as active from setter entry until the
/// emitter has finished, so overlap checks cover the whole exclusive
/// window including notification.
#[derive(Default)]
struct Probe {
    readers: AtomicUsize,
    writers: AtomicUsize,
    violations: AtomicUsize,
}

impl Probe {
    fn read(&self) {
        self.readers.fetch_add(1, Ordering::SeqCst);
        if self.writers.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        thread::sleep(Duration::from_millis(2));
        self.readers.fetch_sub(1, Ordering::SeqCst);
    }

    fn begin_write(&self) {
        if self.writers.fetch_add(1, Ordering::SeqCst) != 0
            || self.readers.load(Ordering::SeqCst) != 0
        {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        thread::sleep(Duration::from_millis(2));
    }

    fn end_write(&self) {
        if self.readers.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
        thread::sleep(Duration::from_millis(1));
        self.writers.fetch_sub(1, Ordering::SeqCst);
    }
}

struct ProbeInterface {
    probe: Arc<Probe>,
}

impl PropertyProvider for ProbeInterface {
    fn getters(&self) -> GetterTable {
        let mut table = GetterTable::new();

        let probe = Arc::clone(&self.probe);
        table.insert(
            "Level".to_string(),
            Box::new(move || {
                probe.read();
                Ok(Value::from(7i64).try_to_owned()?)
            }),
        );

        let probe = Arc::clone(&self.probe);
        table.insert(
            "Mode".to_string(),
            Box::new(move || {
                probe.read();
                Ok(Value::from("idle").try_to_owned()?)
            }),
        );
        table
    }

    fn setters(&self) -> SetterTable {
        let mut table = SetterTable::new();
        let probe = Arc::clone(&self.probe);
        table.insert(
            "Mode".to_string(),
            Box::new(move |_value| {
                probe.begin_write();
                Ok(())
            }),
        );
        table
    }
}

struct ProbeEmitter {
    probe: Arc<Probe>,
}

#[async_trait]
impl SignalEmitter for ProbeEmitter {
    async fn emit_properties_changed(
        &self,
        _sender: &str,
        _changed: HashMap<String, OwnedValue>,
        _invalidated: Vec<String>,
    ) -> zbus::Result<()> {
        self.probe.end_write();
        Ok(())
    }
}

fn dispatcher() -> (Arc<PropertiesDispatcher>, Arc<Probe>) {
    let probe = Arc::new(Probe::default());

    let provider = ProbeInterface {
        probe: Arc::clone(&probe),
    };
    let mut registry = InterfaceRegistry::new();
    registry.register(INTERFACE, &provider);

    let emitter = Arc::new(ProbeEmitter {
        probe: Arc::clone(&probe),
    });
    let dispatcher = Arc::new(PropertiesDispatcher::with_registry(
        "org.mpris.MediaPlayer2.probe".to_string(),
        emitter as Arc<dyn SignalEmitter>,
        registry,
    ));

    (dispatcher, probe)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_all_complete() {
    let (dispatcher, probe) = dispatcher();

    let mut tasks = Vec::new();
    for n in 0..32 {
        let dispatcher = Arc::clone(&dispatcher);
        tasks.push(tokio::spawn(async move {
            if n % 2 == 0 {
                dispatcher.get(INTERFACE, "Level").await.map(|_| ())
            } else {
                dispatcher.get_all(INTERFACE).await.map(|_| ())
            }
        }));
    }

    for outcome in join_all(tasks).await {
        outcome.unwrap().unwrap();
    }

    assert_eq!(probe.violations.load(Ordering::SeqCst), 0);
    assert_eq!(probe.readers.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn writes_never_overlap_reads_or_other_writes() {
    let (dispatcher, probe) = dispatcher();

    let mut tasks = Vec::new();
    for n in 0..32 {
        let dispatcher = Arc::clone(&dispatcher);
        tasks.push(tokio::spawn(async move {
            match n % 4 {
                0 => {
                    let value = Value::from("busy").try_to_owned().unwrap();
                    dispatcher.set(INTERFACE, "Mode", value).await.map(|_| ())
                }
                1 => dispatcher.get_all(INTERFACE).await.map(|_| ()),
                _ => dispatcher.get(INTERFACE, "Level").await.map(|_| ()),
            }
        }));
    }

    for outcome in join_all(tasks).await {
        outcome.unwrap().unwrap();
    }

    assert_eq!(probe.violations.load(Ordering::SeqCst), 0);
    assert_eq!(probe.readers.load(Ordering::SeqCst), 0);
    assert_eq!(probe.writers.load(Ordering::SeqCst), 0);
}
