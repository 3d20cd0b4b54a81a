// ==========================================
// 门店排班系统 - POS 流水领域模型
// ==========================================
// 红线: 流水记录只读,核心只消费 timestamp
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Transaction - POS 订单流水
// ==========================================
// 来源: 门店 POS 系统导出或合成数据生成器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub order_id: i64,                // 订单号
    pub timestamp: DateTime<Utc>,     // 下单时间 (需求分桶的唯一依据)
    pub item_count: i32,              // 商品件数
    pub prep_time_minutes: i32,       // 制作耗时 (分钟)
}
