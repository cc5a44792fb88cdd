//! Matplotlib script that charts the combined export. Fixed text.

const PLOTTING_SCRIPT: &str = r#"# Rainfall charts for the Panchganga basin
# Run from the output directory after `basin-rainfall fetch` has finished.

import glob

import pandas as pd
import matplotlib.pyplot as plt
import seaborn as sns

combined = sorted(glob.glob('rainfall_data/All_Locations_Combined_*.csv'))
if not combined:
    raise SystemExit('No combined rainfall export found under rainfall_data/')

df = pd.read_csv(combined[-1])
df['Date'] = pd.to_datetime(df['Date'])
df['Year'] = df['Date'].dt.year
df['Month'] = df['Date'].dt.month
years = f"{df['Year'].min()}-{df['Year'].max()}"

sns.set_style('whitegrid')

# 1. Annual totals, one panel per location (3 x 4 grid, registry order)
fig, axes = plt.subplots(3, 4, figsize=(20, 15))
fig.suptitle(f'Annual Rainfall by Location ({years})', fontsize=16, fontweight='bold')

locations = df['Location'].unique()
for ax, location in zip(axes.flatten(), locations):
    annual = df[df['Location'] == location].groupby('Year')['Rainfall_mm'].sum()
    ax.plot(annual.index, annual.values, marker='o', linewidth=2)
    ax.set_title(location, fontweight='bold')
    ax.set_xlabel('Year')
    ax.set_ylabel('Annual Rainfall (mm)')
    ax.grid(True, alpha=0.3)

plt.tight_layout()
plt.savefig('annual_rainfall_by_location.png', dpi=300, bbox_inches='tight')
plt.close()

# 2. Mean daily rainfall per calendar month
plt.figure(figsize=(16, 10))
for location in locations:
    monthly = df[df['Location'] == location].groupby('Month')['Rainfall_mm'].mean()
    plt.plot(monthly.index, monthly.values, marker='o', label=location, linewidth=2)

plt.xlabel('Month')
plt.ylabel('Mean Daily Rainfall (mm)')
plt.title(f'Monthly Rainfall Climatology by Location ({years})', fontweight='bold')
plt.legend(bbox_to_anchor=(1.05, 1), loc='upper left')
plt.xticks(range(1, 13), ['Jan', 'Feb', 'Mar', 'Apr', 'May', 'Jun',
                          'Jul', 'Aug', 'Sep', 'Oct', 'Nov', 'Dec'])
plt.tight_layout()
plt.savefig('monthly_climatology.png', dpi=300, bbox_inches='tight')
plt.close()

# 3. Year x location heatmap of annual totals
annual_matrix = df.pivot_table(values='Rainfall_mm', index='Year',
                               columns='Location', aggfunc='sum')
plt.figure(figsize=(14, 10))
sns.heatmap(annual_matrix, annot=True, fmt='.0f', cmap='YlGnBu',
            cbar_kws={'label': 'Rainfall (mm)'})
plt.title(f'Annual Rainfall Heatmap ({years})', fontweight='bold')
plt.tight_layout()
plt.savefig('rainfall_heatmap.png', dpi=300, bbox_inches='tight')
plt.close()

print('Charts written: annual_rainfall_by_location.png, monthly_climatology.png, rainfall_heatmap.png')
"#;

pub fn generate_plotting_script() -> &'static str {
    PLOTTING_SCRIPT
}

// -- Tests -------------------------------------------------------------------
