//! 命令行参数

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::generate::GeneratorOptions;

/// 生成合成星型模型数据并写入仓库
#[derive(Debug, Parser)]
#[command(name = "warehouse-etl", version, about)]
pub struct Cli {
    /// 配置目录
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    #[arg(long, default_value_t = 100)]
    pub customers: usize,

    #[arg(long, default_value_t = 50)]
    pub products: usize,

    #[arg(long, default_value_t = 10)]
    pub stores: usize,

    #[arg(long, default_value_t = 500)]
    pub sales: usize,

    #[arg(long, default_value_t = 100)]
    pub inventory: usize,

    /// 日期维度起始日（含）
    #[arg(long, default_value = "2020-01-01")]
    pub start_date: NaiveDate,

    /// 日期维度结束日（含）
    #[arg(long, default_value = "2022-12-31")]
    pub end_date: NaiveDate,

    /// 随机种子，相同种子生成相同数据
    #[arg(long)]
    pub seed: Option<u64>,

    /// 从该目录下的订单 CSV 导入，而不是随机合成；
    /// 只有 `--stores` 和 `--seed` 对导入生效
    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// 只建表，不写数据
    #[arg(long)]
    pub schema_only: bool,
}

impl Cli {
    pub fn generator_options(&self, today: NaiveDate) -> GeneratorOptions {
        GeneratorOptions {
            customers: self.customers,
            products: self.products,
            stores: self.stores,
            sales: self.sales,
            inventory: self.inventory,
            start_date: self.start_date,
            end_date: self.end_date,
            today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["warehouse-etl"]).unwrap();
        assert_eq!(cli.config_dir, "config");
        assert_eq!(cli.customers, 100);
        assert_eq!(cli.products, 50);
        assert_eq!(cli.stores, 10);
        assert_eq!(cli.sales, 500);
        assert_eq!(cli.inventory, 100);
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2022, 12, 31).unwrap());
        assert_eq!(cli.seed, None);
        assert_eq!(cli.csv_dir, None);
        assert!(!cli.schema_only);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "warehouse-etl",
            "--sales",
            "20",
            "--start-date",
            "2021-06-01",
            "--seed",
            "9",
            "--schema-only",
        ])
        .unwrap();
        assert_eq!(cli.sales, 20);
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2021, 6, 1).unwrap());
        assert_eq!(cli.seed, Some(9));
        assert!(cli.schema_only);

        let today = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let options = cli.generator_options(today);
        assert_eq!(options.sales, 20);
        assert_eq!(options.today, today);
    }

    #[test]
    fn test_csv_dir() {
        let cli =
            Cli::try_parse_from(["warehouse-etl", "--csv-dir", "data/superstore", "--stores", "4"])
                .unwrap();
        assert_eq!(cli.csv_dir, Some(PathBuf::from("data/superstore")));
        assert_eq!(cli.stores, 4);
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Cli::try_parse_from(["warehouse-etl", "--end-date", "2022-13-01"]).is_err());
    }
}
