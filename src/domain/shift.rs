// ==========================================
// 门店排班系统 - 班次目录领域模型
// ==========================================
// 红线: 班次目录为固定配置,不从数据推导
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ShiftDefinition - 班次定义
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub name: String,    // 班次名 ("morning" / "evening")
    pub start_hour: u32, // 起始小时 (含)
    pub end_hour: u32,   // 结束小时 (不含, 24 表示跨到次日 0 点)
}

// ==========================================
// Trait: ShiftWindow
// ==========================================
// 用途: 需求分桶与展示所需的时间窗口查询接口
pub trait ShiftWindow {
    /// 班次时长（小时）
    fn duration_hours(&self) -> f64;

    /// 判断小时数是否落在 [start, end) 窗口内
    fn contains_hour(&self, hour: u32) -> bool;

    /// 展示用时间段字符串（如 "16:00-00:00"）
    fn time_range(&self) -> String;
}

impl ShiftDefinition {
    pub fn new(name: &str, start_hour: u32, end_hour: u32) -> Self {
        Self {
            name: name.to_string(),
            start_hour,
            end_hour,
        }
    }
}

impl ShiftWindow for ShiftDefinition {
    fn duration_hours(&self) -> f64 {
        (self.end_hour.saturating_sub(self.start_hour)) as f64
    }

    fn contains_hour(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }

    fn time_range(&self) -> String {
        // 24 点按次日 00:00 展示
        format!("{:02}:00-{:02}:00", self.start_hour, self.end_hour % 24)
    }
}

// ==========================================
// ShiftCatalog - 班次目录
// ==========================================
// 目录顺序即排班遍历顺序,不可依赖 HashMap 迭代序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftCatalog {
    shifts: Vec<ShiftDefinition>,
}

impl ShiftCatalog {
    pub fn new(shifts: Vec<ShiftDefinition>) -> Self {
        Self { shifts }
    }

    /// 默认目录: 早班 08:00-16:00, 晚班 16:00-00:00
    pub fn standard() -> Self {
        Self::new(vec![
            ShiftDefinition::new("morning", 8, 16),
            ShiftDefinition::new("evening", 16, 24),
        ])
    }

    /// 按目录顺序迭代班次
    pub fn iter(&self) -> impl Iterator<Item = &ShiftDefinition> {
        self.shifts.iter()
    }

    /// 班次数量
    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// 按名称查找班次
    pub fn find(&self, name: &str) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| s.name == name)
    }

    /// 查找覆盖指定小时的班次（用于流水分桶）
    ///
    /// # 返回
    /// - Some(&ShiftDefinition): 落在某个班次窗口内
    /// - None: 所有班次窗口之外（该笔流水被静默丢弃）
    pub fn shift_for_hour(&self, hour: u32) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| s.contains_hour(hour))
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_windows() {
        let catalog = ShiftCatalog::standard();
        assert_eq!(catalog.len(), 2);

        let morning = catalog.find("morning").unwrap();
        assert_eq!(morning.duration_hours(), 8.0);
        assert!(morning.contains_hour(8));
        assert!(morning.contains_hour(15));
        assert!(!morning.contains_hour(16));

        let evening = catalog.find("evening").unwrap();
        assert!(evening.contains_hour(23));
        assert_eq!(evening.time_range(), "16:00-00:00");
    }

    #[test]
    fn test_shift_for_hour_outside_windows() {
        // 凌晨时段不属于任何班次
        let catalog = ShiftCatalog::standard();
        assert!(catalog.shift_for_hour(3).is_none());
        assert_eq!(catalog.shift_for_hour(8).unwrap().name, "morning");
        assert_eq!(catalog.shift_for_hour(16).unwrap().name, "evening");
    }
}
