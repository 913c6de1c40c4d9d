use std::collections::HashMap;

use super::{ChartBackend, ChartConfig, ChartId, ChartInstance};
use crate::data::NavigationRequest;

struct ChartHandle {
    config: ChartConfig,
    instance: Box<dyn ChartInstance>,
}

/// Owner of every live chart, at most one per id.
///
/// Rendering an id that already has a live chart either updates it in place
/// (same kind) or destroys it before the replacement is created.  The handle
/// count is therefore bounded by the number of distinct ids ever rendered.
pub struct ChartRegistry {
    backend: Box<dyn ChartBackend>,
    handles: HashMap<ChartId, ChartHandle>,
}

impl ChartRegistry {
    pub fn new(backend: impl ChartBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            handles: HashMap::new(),
        }
    }

    pub fn render(&mut self, id: impl Into<ChartId>, config: ChartConfig) {
        let id = id.into();
        if let Some(handle) = self.handles.get_mut(&id) {
            if handle.config.kind == config.kind {
                if handle.config != config {
                    log::debug!("updating chart {id}");
                    handle.instance.update(&config);
                    handle.config = config;
                }
                return;
            }
        }
        self.teardown(id.as_str());

        log::debug!("creating {:?} chart {id}", config.kind);
        let instance = self.backend.create(&id, &config);
        self.handles.insert(id, ChartHandle { config, instance });
    }

    /// Destroy and forget the chart under `id`.  Returns whether one was live.
    pub fn teardown(&mut self, id: &str) -> bool {
        match self.handles.remove(id) {
            Some(mut handle) => {
                log::debug!("destroying chart {id}");
                handle.instance.destroy();
                true
            }
            None => false,
        }
    }

    pub fn teardown_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            self.teardown(id);
        }
    }

    pub fn clear(&mut self) {
        for (id, mut handle) in self.handles.drain() {
            log::debug!("destroying chart {id}");
            handle.instance.destroy();
        }
    }

    /// Resolve a click on a data point into the navigation it triggers.
    pub fn click(&self, id: &str, dataset: usize, index: usize) -> Option<NavigationRequest> {
        self.handles
            .get(id)?
            .config
            .drill_down_request(dataset, index)
    }

    pub fn config(&self, id: &str) -> Option<&ChartConfig> {
        self.handles.get(id).map(|handle| &handle.config)
    }

    pub fn is_live(&self, id: &str) -> bool {
        self.handles.contains_key(id)
    }

    pub fn live(&self) -> impl Iterator<Item = &ChartId> {
        self.handles.keys()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Drop for ChartRegistry {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::chart::{Axis, ChartKind, Dataset, Series};

    #[derive(Default)]
    struct Log(Vec<String>);

    struct LoggingBackend(Rc<RefCell<Log>>);

    struct LoggingInstance {
        id: ChartId,
        log: Rc<RefCell<Log>>,
    }

    impl ChartBackend for LoggingBackend {
        fn create(&mut self, id: &ChartId, config: &ChartConfig) -> Box<dyn ChartInstance> {
            self.0.borrow_mut().0.push(format!("create {id} {:?}", config.kind));
            Box::new(LoggingInstance {
                id: id.clone(),
                log: self.0.clone(),
            })
        }
    }

    impl ChartInstance for LoggingInstance {
        fn update(&mut self, _config: &ChartConfig) {
            self.log.borrow_mut().0.push(format!("update {}", self.id));
        }

        fn destroy(&mut self) {
            self.log.borrow_mut().0.push(format!("destroy {}", self.id));
        }
    }

    fn config(kind: ChartKind, values: Vec<f64>) -> ChartConfig {
        ChartConfig::new(kind).dataset(Dataset {
            label: "values".into(),
            series: Series::Values(values),
            colors: vec![],
            axis: Axis::Primary,
        })
    }

    fn registry() -> (ChartRegistry, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        (ChartRegistry::new(LoggingBackend(log.clone())), log)
    }

    #[test]
    fn kind_change_destroys_before_creating() {
        let (mut charts, log) = registry();
        charts.render("a", config(ChartKind::Bar, vec![1.0]));
        charts.render("a", config(ChartKind::Doughnut, vec![1.0]));

        assert_eq!(
            log.borrow().0,
            vec!["create a Bar", "destroy a", "create a Doughnut"]
        );
        assert_eq!(charts.len(), 1);
    }

    #[test]
    fn same_kind_updates_in_place() {
        let (mut charts, log) = registry();
        charts.render("a", config(ChartKind::Bar, vec![1.0]));
        charts.render("a", config(ChartKind::Bar, vec![1.0]));
        charts.render("a", config(ChartKind::Bar, vec![2.0]));

        assert_eq!(log.borrow().0, vec!["create a Bar", "update a"]);
        assert_eq!(charts.config("a"), Some(&config(ChartKind::Bar, vec![2.0])));
    }

    #[test]
    fn teardown_and_drop_destroy_live_charts() {
        let (mut charts, log) = registry();
        charts.render("a", config(ChartKind::Bar, vec![1.0]));
        charts.render("b", config(ChartKind::Bar, vec![1.0]));
        assert!(charts.teardown("a"));
        assert!(!charts.teardown("a"));
        drop(charts);

        let log = log.borrow();
        assert_eq!(log.0.iter().filter(|l| l.starts_with("destroy")).count(), 2);
    }
}
