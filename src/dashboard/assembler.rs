//! Page assembly
//!
//! resolve -> derive names -> load each slot -> freshness -> `PageModel`.
//! Every failure is contained in the slot or field it belongs to; `assemble`
//! itself cannot fail.

use hyper::body::Bytes;
use std::sync::Arc;

use super::error::FragmentError;
use super::freshness::{Freshness, FreshnessSource};
use super::location::{fragment_name, FragmentSlot, LocationKey};
use super::store::FragmentStore;
use super::template::PageTemplateDescriptor;
use crate::logger;

#[derive(Debug)]
pub enum SlotContent {
    Loaded(Bytes),
    Unavailable(FragmentError),
}

impl SlotContent {
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

#[derive(Debug)]
pub struct PageSlot {
    pub slot: FragmentSlot,
    pub fragment: String,
    pub content: SlotContent,
}

/// Assembled page, ready for the view layer
#[derive(Debug)]
pub struct PageModel {
    pub title: String,
    pub location: LocationKey,
    pub freshness: Freshness,
    /// In template order
    pub slots: Vec<PageSlot>,
    pub footer: String,
    pub columns: usize,
}

impl PageModel {
    #[cfg(test)]
    pub fn slot(&self, slot: FragmentSlot) -> Option<&SlotContent> {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .map(|s| &s.content)
    }

    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.content.is_available())
            .count()
    }
}

#[derive(Clone)]
pub struct PageAssembler {
    store: Arc<dyn FragmentStore>,
    freshness: Arc<dyn FreshnessSource>,
}

impl PageAssembler {
    pub fn new(store: Arc<dyn FragmentStore>, freshness: Arc<dyn FreshnessSource>) -> Self {
        Self { store, freshness }
    }

    pub async fn assemble(
        &self,
        template: &PageTemplateDescriptor,
        key: &LocationKey,
    ) -> PageModel {
        let mut slots = Vec::with_capacity(template.slots.len());
        for &slot in &template.slots {
            let fragment = fragment_name(key, slot, &template.suffixes);
            let content = match self.store.load(&fragment).await {
                Ok(bytes) => SlotContent::Loaded(bytes),
                Err(err) => {
                    logger::log_fragment_unavailable(&err);
                    SlotContent::Unavailable(err)
                }
            };
            slots.push(PageSlot {
                slot,
                fragment,
                content,
            });
        }

        let freshness = match self.freshness.last_modified(&template.data_source).await {
            Ok(at) => Freshness::known(at),
            Err(err) => {
                logger::log_freshness_unavailable(&err);
                Freshness::Unknown
            }
        };

        let page = PageModel {
            title: template.title_for(key),
            location: key.clone(),
            freshness,
            slots,
            footer: template.footer.clone(),
            columns: template.columns,
        };
        logger::log_page_assembled(&template.name, key.as_str(), page.available_count(), page.slots.len());
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::freshness::FixedFreshnessSource;
    use crate::dashboard::location::LocationResolver;
    use crate::dashboard::store::MemoryFragmentStore;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    const DEFAULT: &str = "Delaware_County_Pennsylvania";

    fn fixed_time() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2020, 11, 2, 9, 5, 7).unwrap()
    }

    fn county_store(key: &str) -> MemoryFragmentStore {
        MemoryFragmentStore::new()
            .with_fragment(&format!("{key}_new_cases.html"), "<div>new cases</div>")
            .with_fragment(&format!("{key}_trend.html"), "<div>trend</div>")
            .with_fragment(&format!("{key}_yellow_target.html"), "<div>target</div>")
            .with_fragment(&format!("{key}_posneg.html"), "<div>posneg</div>")
    }

    fn assembler(store: MemoryFragmentStore, at: Option<chrono::DateTime<Local>>) -> PageAssembler {
        PageAssembler::new(Arc::new(store), Arc::new(FixedFreshnessSource(at)))
    }

    fn county() -> PageTemplateDescriptor {
        PageTemplateDescriptor::county(PathBuf::from("/data/csse_covid_19_daily_reports"))
    }

    #[tokio::test]
    async fn test_default_location_all_fragments_present() {
        let resolver = LocationResolver::new(DEFAULT);
        let key = resolver.resolve(None);
        let page = assembler(county_store(DEFAULT), Some(fixed_time()))
            .assemble(&county(), &key)
            .await;

        assert!(page.title.contains("Delaware County Pennsylvania"));
        assert_eq!(page.location.as_str(), DEFAULT);
        assert_eq!(page.slots.len(), 4);
        assert_eq!(page.available_count(), 4);
        assert_eq!(
            page.freshness.display(),
            Some("Monday November 02, 2020 at 09:05:07")
        );
        match page.slot(FragmentSlot::Target) {
            Some(SlotContent::Loaded(bytes)) => assert_eq!(&bytes[..], b"<div>target</div>"),
            other => panic!("unexpected target slot: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_one_missing_fragment_is_isolated() {
        let store = MemoryFragmentStore::new()
            .with_fragment(&format!("{DEFAULT}_new_cases.html"), "a")
            .with_fragment(&format!("{DEFAULT}_yellow_target.html"), "b")
            .with_fragment(&format!("{DEFAULT}_posneg.html"), "c");
        let key = LocationResolver::new(DEFAULT).resolve(None);
        let page = assembler(store, Some(fixed_time()))
            .assemble(&county(), &key)
            .await;

        assert_eq!(page.slots.len(), 4);
        assert_eq!(page.available_count(), 3);
        match page.slot(FragmentSlot::Trend) {
            Some(SlotContent::Unavailable(FragmentError::NotFound { name })) => {
                assert_eq!(name, "Delaware_County_Pennsylvania_trend.html");
            }
            other => panic!("expected trend to be unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_location_marks_all_slots_unavailable() {
        let key = LocationResolver::new(DEFAULT).resolve(Some("Nonexistent_County"));
        let page = assembler(county_store(DEFAULT), Some(fixed_time()))
            .assemble(&county(), &key)
            .await;

        assert_eq!(page.slots.len(), 4);
        assert_eq!(page.available_count(), 0);
        assert!(page.freshness.display().is_some());
        assert_eq!(page.slots[0].fragment, "Nonexistent_County_new_cases.html");
    }

    #[tokio::test]
    async fn test_freshness_failure_does_not_affect_slots() {
        let key = LocationResolver::new(DEFAULT).resolve(None);
        let page = assembler(county_store(DEFAULT), None)
            .assemble(&county(), &key)
            .await;

        assert_eq!(page.freshness, Freshness::Unknown);
        assert_eq!(page.available_count(), 4);
    }

    #[tokio::test]
    async fn test_slot_set_is_template_driven() {
        let key = LocationResolver::new(DEFAULT).resolve(Some("Pennsylvania_State"));
        let store = MemoryFragmentStore::new()
            .with_fragment("Pennsylvania_State_new_cases.html", "a")
            .with_fragment("Pennsylvania_State_trend.html", "b")
            .with_fragment("Pennsylvania_State_per_capita.html", "c")
            .with_fragment("Pennsylvania_State_yellow_target.html", "d")
            .with_fragment("Pennsylvania_State_posneg.html", "e");
        let assembler = assembler(store, Some(fixed_time()));

        let data = PathBuf::from("/data");
        let state = assembler
            .assemble(&PageTemplateDescriptor::state(data.clone()), &key)
            .await;
        let order: Vec<_> = state.slots.iter().map(|s| s.slot).collect();
        assert_eq!(
            order,
            [FragmentSlot::NewCases, FragmentSlot::Trend, FragmentSlot::Target]
        );
        assert_eq!(state.available_count(), 3);
        assert_eq!(state.slots[2].fragment, "Pennsylvania_State_per_capita.html");

        let county = assembler
            .assemble(&PageTemplateDescriptor::county(data), &key)
            .await;
        let order: Vec<_> = county.slots.iter().map(|s| s.slot).collect();
        assert_eq!(
            order,
            [
                FragmentSlot::NewCases,
                FragmentSlot::Target,
                FragmentSlot::Trend,
                FragmentSlot::PosNeg
            ]
        );
        assert_eq!(county.available_count(), 4);
        assert_eq!(county.slots[1].fragment, "Pennsylvania_State_yellow_target.html");
    }

    #[tokio::test]
    async fn test_traversal_key_yields_unavailable_slots() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("fragments");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(dir.path().join("secret_trend.html"), "secret").unwrap();

        let assembler = PageAssembler::new(
            Arc::new(crate::dashboard::store::FsFragmentStore::new(&root)),
            Arc::new(FixedFreshnessSource(Some(fixed_time()))),
        );
        let key = LocationResolver::new(DEFAULT).resolve(Some("../secret"));
        let page = assembler.assemble(&county(), &key).await;

        assert_eq!(page.available_count(), 0);
        assert!(page.slots.iter().all(|s| matches!(
            s.content,
            SlotContent::Unavailable(FragmentError::InvalidName { .. })
        )));
    }
}
