#![no_main]
use headsync::{build, filter_elements, Child, TagSets};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(children) = serde_json::from_slice::<Vec<Child>>(data) {
        let elements = filter_elements(&children);
        let descriptor = build(&elements, Some("%s"));
        for (tag, entry) in descriptor.entries() {
            assert!(TagSets::shared().is_valid(tag));
            assert!(entry.bags().all(|bag| !bag.contains_key("children")));
        }
        let _ = serde_json::to_vec(&descriptor);
    }
});
