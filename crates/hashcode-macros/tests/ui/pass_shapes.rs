use std::collections::BTreeMap;

use hashcode::{hashcode, Hashcode};

#[derive(Hashcode)]
pub struct Config<'a, K, V>
where
    K: Ord,
{
    pub name: &'a str,
    pub entries: BTreeMap<K, V>,
    #[hashcode(ignore)]
    pub cached: Option<u64>,
}

#[derive(Hashcode)]
pub enum Event<T> {
    Started,
    Progress(T),
    Finished {
        code: i32,
        #[hashcode(skip)]
        message: String,
    },
}

fn main() {
    let config: Config<'_, String, u32> = Config {
        name: "app",
        entries: BTreeMap::new(),
        cached: None,
    };
    let _ = hashcode(&config);
    let _ = hashcode(&Event::<u8>::Progress(3));
    let _ = hashcode(&Event::<u8>::Started);
    let _ = hashcode(&Event::<u8>::Finished {
        code: 0,
        message: String::new(),
    });
}
