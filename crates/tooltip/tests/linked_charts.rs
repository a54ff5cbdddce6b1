//! Tooltip synchronization between linked chart instances

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chart_tooltip::{
    config_system::{LifecycleEvent, TooltipConfig},
    shared_types::{ChartData, ChartGeometry, DataPoint, SeriesTarget, XValue},
    LinkRegistry, MemoryHost, ShowRequest, TooltipChart, TooltipContext,
};

fn data(len: usize) -> ChartData {
    ChartData::new(vec![SeriesTarget {
        id: "price".into(),
        values: (0..len)
            .map(|i| DataPoint::new("price", i, XValue::Number(i as f64), Some(i as f64 * 2.0)))
            .collect(),
    }])
}

fn linked_chart(
    registry: &LinkRegistry,
    name: &str,
    len: usize,
) -> (Rc<RefCell<TooltipChart>>, MemoryHost) {
    let host = MemoryHost::new().with_container_size(100.0, 40.0);
    let config = TooltipConfig::default().with_linked(name);
    let ctx = TooltipContext::new(config, ChartGeometry::default());
    let chart = TooltipChart::new(ctx, data(len), host.clone()).into_shared(registry);
    (chart, host)
}

fn shown_index(chart: &Rc<RefCell<TooltipChart>>) -> Option<usize> {
    chart.borrow().render_state().map(|s| s.index)
}

#[test]
fn test_show_propagates_to_linked_chart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "dashboard", 5);
    let (b, _) = linked_chart(&registry, "dashboard", 5);

    a.borrow_mut().show(ShowRequest::Index(2)).unwrap();

    assert_eq!(shown_index(&a), Some(2));
    assert_eq!(shown_index(&b), Some(2));
    assert!(b.borrow().is_visible());
}

#[test]
fn test_detached_chart_is_not_synchronized() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "dashboard", 5);
    let (b, host_b) = linked_chart(&registry, "dashboard", 5);

    host_b.set_attached(false);
    a.borrow_mut().show(ShowRequest::Index(2)).unwrap();

    assert_eq!(shown_index(&a), Some(2));
    assert_eq!(shown_index(&b), None);
}

#[test]
fn test_hide_propagates() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "", 5);
    let (b, _) = linked_chart(&registry, "", 5);

    a.borrow_mut().show(ShowRequest::Index(1)).unwrap();
    assert!(b.borrow().is_visible());

    a.borrow_mut().hide();
    assert!(!a.borrow().is_visible());
    assert!(!b.borrow().is_visible());
}

#[test]
fn test_hide_fires_peer_hooks_once() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "g", 5);
    let (b, _) = linked_chart(&registry, "g", 5);

    let hides = Rc::new(Cell::new(0));
    let hiddens = Rc::new(Cell::new(0));
    let config = TooltipConfig::default()
        .with_linked("g")
        .with_hook(LifecycleEvent::Hide, {
            let hides = hides.clone();
            move || hides.set(hides.get() + 1)
        })
        .with_hook(LifecycleEvent::Hidden, {
            let hiddens = hiddens.clone();
            move || hiddens.set(hiddens.get() + 1)
        });
    let ctx = TooltipContext::new(config, ChartGeometry::default());
    let c = TooltipChart::new(ctx, data(5), MemoryHost::new()).into_shared(&registry);

    a.borrow_mut().show(ShowRequest::Index(1)).unwrap();
    assert_eq!(shown_index(&c), Some(1));

    a.borrow_mut().hide();
    assert!(!b.borrow().is_visible());
    assert!(!c.borrow().is_visible());
    assert_eq!(hides.get(), 1);
    assert_eq!(hiddens.get(), 1);
}

#[test]
fn test_different_names_are_independent() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "left", 5);
    let (b, _) = linked_chart(&registry, "right", 5);

    a.borrow_mut().show(ShowRequest::Index(3)).unwrap();
    assert_eq!(shown_index(&b), None);
}

#[test]
fn test_peer_failure_does_not_stop_others() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "g", 5);
    // Too short to have an index 4
    let (short, _) = linked_chart(&registry, "g", 2);
    let (c, _) = linked_chart(&registry, "g", 5);

    a.borrow_mut().show(ShowRequest::Index(4)).unwrap();

    assert_eq!(shown_index(&short), None);
    assert_eq!(shown_index(&c), Some(4));
}

#[test]
fn test_dropped_chart_leaves_registry() {
    let registry = LinkRegistry::new();
    let (a, _) = linked_chart(&registry, "g", 5);
    {
        let (_b, _) = linked_chart(&registry, "g", 5);
    }

    a.borrow_mut().show(ShowRequest::Index(1)).unwrap();
    registry.prune();
    assert_eq!(registry.len(), 1);
}
