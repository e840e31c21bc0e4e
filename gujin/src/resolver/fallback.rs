//! Builtin gazetteer of famous ancient place names.
//!
//! A small offline table covering the well-known ancient capitals, used when
//! the resolution backend is unreachable or explicitly bypassed. Entries
//! mirror the backend's own fallback data.

use crate::place::PlaceResult;

struct Entry {
    ancient_name: &'static str,
    modern_name: &'static str,
    province: &'static str,
    latitude: f64,
    longitude: f64,
    description: &'static str,
    dynasty_info: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        ancient_name: "长安",
        modern_name: "西安市",
        province: "陕西省",
        latitude: 34.26,
        longitude: 108.94,
        description: "十三朝古都，丝绸之路的东方起点。",
        dynasty_info: "西周、秦、西汉、隋、唐等",
    },
    Entry {
        ancient_name: "临安",
        modern_name: "杭州市",
        province: "浙江省",
        latitude: 30.25,
        longitude: 120.17,
        description: "南宋都城，江南水乡名城。",
        dynasty_info: "南宋",
    },
    Entry {
        ancient_name: "金陵",
        modern_name: "南京市",
        province: "江苏省",
        latitude: 32.06,
        longitude: 118.78,
        description: "六朝古都，虎踞龙盘之地。",
        dynasty_info: "东吴、东晋、宋齐梁陈、明初",
    },
    Entry {
        ancient_name: "汴梁",
        modern_name: "开封市",
        province: "河南省",
        latitude: 34.79,
        longitude: 114.31,
        description: "北宋都城，清明上河图所绘之地。",
        dynasty_info: "北宋",
    },
    Entry {
        ancient_name: "洛阳",
        modern_name: "洛阳市",
        province: "河南省",
        latitude: 34.62,
        longitude: 112.45,
        description: "九朝古都，居天下之中。",
        dynasty_info: "东周、东汉、魏晋、北魏、隋唐",
    },
    Entry {
        ancient_name: "姑苏",
        modern_name: "苏州市",
        province: "江苏省",
        latitude: 31.30,
        longitude: 120.62,
        description: "吴国故都，园林甲天下。",
        dynasty_info: "春秋吴国",
    },
    Entry {
        ancient_name: "襄阳",
        modern_name: "襄阳市",
        province: "湖北省",
        latitude: 32.01,
        longitude: 112.12,
        description: "兵家必争之地，汉水重镇。",
        dynasty_info: "东汉、三国、宋元",
    },
    Entry {
        ancient_name: "邯郸",
        modern_name: "邯郸市",
        province: "河北省",
        latitude: 36.61,
        longitude: 114.49,
        description: "赵国都城，成语之乡。",
        dynasty_info: "战国赵国",
    },
];

/// Looks up an ancient place name in the builtin table.
pub fn lookup(ancient_name: &str) -> Option<PlaceResult> {
    let name = ancient_name.trim();
    ENTRIES
        .iter()
        .find(|e| e.ancient_name == name)
        .map(|e| PlaceResult {
            ancient_name: e.ancient_name.to_string(),
            modern_name: e.modern_name.to_string(),
            province: e.province.to_string(),
            latitude: e.latitude,
            longitude: e.longitude,
            description: e.description.to_string(),
            dynasty_info: e.dynasty_info.to_string(),
        })
}

/// Ancient names present in the builtin table, for CLI hints.
pub fn known_names() -> Vec<&'static str> {
    ENTRIES.iter().map(|e| e.ancient_name).collect()
}
